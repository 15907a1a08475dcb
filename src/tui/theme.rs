//! Dark/light theme with a durable preference

use colored::Color;
use std::path::Path;
use tracing::{debug, warn};

/// File holding the preference inside the data directory
const THEME_FILE: &str = "theme";

/// Terminal color theme
///
/// Anything other than a stored `"dark"` preference means light mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Load the stored preference, defaulting to light mode
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Self {
        match std::fs::read_to_string(data_dir.as_ref().join(THEME_FILE)) {
            Ok(raw) if raw.trim() == "dark" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(err) => {
                debug!("No stored theme preference: {}", err);
                Theme::Light
            }
        }
    }

    /// Persist the preference; failures are logged, not propagated
    pub fn persist<P: AsRef<Path>>(self, data_dir: P) {
        let path = data_dir.as_ref().join(THEME_FILE);
        if let Err(err) = std::fs::write(&path, self.name()) {
            warn!("Failed to persist theme preference: {}", err);
        }
    }

    /// Flip between dark and light mode
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The stored name of the theme
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Color for the welcome banner
    pub fn banner_color(self) -> Color {
        match self {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::BrightCyan,
        }
    }

    /// Color for assistant answers
    pub fn assistant_color(self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::BrightWhite,
        }
    }

    /// Color for hints, prompts, and the thinking indicator
    pub fn hint_color(self) -> Color {
        match self {
            Theme::Light => Color::BrightBlack,
            Theme::Dark => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_to_light() {
        let dir = tempdir().unwrap();
        assert_eq!(Theme::load(dir.path()), Theme::Light);
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempdir().unwrap();

        Theme::Dark.persist(dir.path());
        assert_eq!(Theme::load(dir.path()), Theme::Dark);

        Theme::Light.persist(dir.path());
        assert_eq!(Theme::load(dir.path()), Theme::Light);
    }

    #[test]
    fn test_unknown_preference_means_light() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(THEME_FILE), "solarized").unwrap();
        assert_eq!(Theme::load(dir.path()), Theme::Light);
    }

    #[test]
    fn test_toggle_flips_modes() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.name(), "dark");
    }
}
