//! Markdown rendering for terminal output
//!
//! The backend answers in markdown. This renderer flattens it into
//! plain terminal text: emphasis markers are dropped, list items get
//! bullet or number prefixes, and link targets are appended after the
//! link text.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Render a markdown answer as plain terminal text
pub fn render(source: &str) -> String {
    let mut out = String::new();
    // One entry per open list; `Some` carries the next ordered number
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut link_dest: Option<String> = None;

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => match lists.last_mut() {
                Some(Some(number)) => {
                    out.push_str(&format!("{}. ", number));
                    *number += 1;
                }
                _ => out.push_str("• "),
            },
            Event::End(TagEnd::Item) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::End(TagEnd::CodeBlock) => out.push('\n'),
            Event::Start(Tag::Link { dest_url, .. }) => {
                link_dest = Some(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => {
                if let Some(dest) = link_dest.take() {
                    out.push_str(&format!(" ({})", dest));
                }
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Paragraph) => {
                // Inside a list these belong to an item; the item adds
                // its own line break
                if lists.is_empty() {
                    out.push_str("\n\n");
                }
            }
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => {
                out.push('`');
                out.push_str(&code);
                out.push('`');
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("---\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let text = render("# Chefchaouen\n\nThe Blue City.");
        assert_eq!(text, "Chefchaouen\n\nThe Blue City.");
    }

    #[test]
    fn test_emphasis_markers_are_dropped() {
        let text = render("**Marrakesh** is *vibrant*.");
        assert_eq!(text, "Marrakesh is vibrant.");
    }

    #[test]
    fn test_bullet_lists() {
        let text = render("- mint tea\n- tagine");
        assert_eq!(text, "• mint tea\n• tagine");
    }

    #[test]
    fn test_ordered_lists_count_up() {
        let text = render("1. Fes\n2. Meknes\n3. Rabat");
        assert_eq!(text, "1. Fes\n2. Meknes\n3. Rabat");
    }

    #[test]
    fn test_inline_code_keeps_backticks() {
        let text = render("Use the `medina` entrance.");
        assert_eq!(text, "Use the `medina` entrance.");
    }

    #[test]
    fn test_links_show_their_target() {
        let text = render("See [the guide](https://example.com/fes).");
        assert_eq!(text, "See the guide (https://example.com/fes).");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = render("Just a sentence.");
        assert_eq!(text, "Just a sentence.");
    }
}
