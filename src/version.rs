//! Version information for Marhaba

/// The version of Marhaba, taken from Cargo.toml at build time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the application
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// The description of the application
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get the full version string for display
pub fn full_version() -> String {
    format!("{} v{}", APP_NAME, VERSION)
}

/// User agent sent with every backend request
pub fn user_agent() -> String {
    format!("{}/{}", APP_NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "marhaba");
        assert!(!APP_DESCRIPTION.is_empty());
    }

    #[test]
    fn test_version_strings() {
        let full = full_version();
        assert!(full.contains(APP_NAME));
        assert!(full.contains(VERSION));

        let agent = user_agent();
        assert_eq!(agent, format!("marhaba/{}", VERSION));
    }
}
