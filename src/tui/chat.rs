//! Interactive chat view

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    chat::Conversation,
    tui::{markdown, Theme},
};

/// Line-oriented conversation view
///
/// Reads questions from stdin, prints markdown-rendered answers, and
/// handles the `/new`, `/theme`, `/help`, and `/quit` commands.
pub struct ChatView {
    conversation: Arc<Conversation>,
    theme: Theme,
    data_dir: PathBuf,
}

impl ChatView {
    /// Create a view over a conversation, restoring the stored theme
    pub fn new(conversation: Arc<Conversation>, data_dir: PathBuf) -> Self {
        let theme = Theme::load(&data_dir);
        Self {
            conversation,
            theme,
            data_dir,
        }
    }

    /// Run the conversation loop until EOF or `/quit`
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            self.print_prompt()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            match line.trim() {
                "" => continue,
                "/quit" | "/exit" => break,
                "/new" => {
                    self.conversation.clear().await;
                    self.print_hint("Started a new conversation.");
                }
                "/theme" => {
                    self.theme = self.theme.toggle();
                    self.theme.persist(&self.data_dir);
                    self.print_hint(&format!("Switched to {} mode.", self.theme.name()));
                }
                "/help" => self.print_help(),
                command if command.starts_with('/') => {
                    self.print_hint("Unknown command. Type /help for the list.");
                }
                question => {
                    self.print_hint("Thinking...");
                    if let Some(reply) = self.conversation.submit(question).await {
                        self.print_reply(&reply.text);
                    }
                }
            }
        }

        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!(
            "{}",
            "Welcome to Morocco Travel Assistant"
                .color(self.theme.banner_color())
                .bold()
        );
        println!(
            "{}",
            "Ask me anything about tourist attractions, culture, local customs, or travel tips in Morocco!"
                .color(self.theme.hint_color())
        );
        println!(
            "{}",
            "Type /help for commands.".color(self.theme.hint_color())
        );
        println!();
    }

    fn print_prompt(&self) -> Result<()> {
        print!("{} ", "Ask about Morocco ❯".color(self.theme.hint_color()));
        std::io::stdout().flush()?;
        Ok(())
    }

    fn print_hint(&self, hint: &str) {
        println!("{}", hint.color(self.theme.hint_color()));
    }

    fn print_help(&self) {
        self.print_hint("/new    start a new conversation");
        self.print_hint("/theme  switch between dark and light mode");
        self.print_hint("/quit   leave the chat");
    }

    fn print_reply(&self, text: &str) {
        let rendered = markdown::render(text);
        println!();
        println!("{}", rendered.as_str().color(self.theme.assistant_color()));
        println!();
    }
}
