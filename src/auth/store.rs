//! Durable storage for the bearer token

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// On-disk home of the bearer token
///
/// The session manager is the only writer; everything else reads the
/// in-memory session state instead.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store rooted in the data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join("token"),
        }
    }

    /// Read the stored token, if any
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(err) => {
                debug!("No stored token at {}: {}", self.path.display(), err);
                None
            }
        }
    }

    /// Persist a token, replacing any previous one
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    /// Remove the stored token
    ///
    /// Removal failures are logged and swallowed; logout must always
    /// complete.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed stored token"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => error!("Failed to remove stored token: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        assert!(store.load().is_none());
        store.save("secret-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("secret-token"));

        store.save("replacement").unwrap();
        assert_eq!(store.load().as_deref(), Some("replacement"));
    }

    #[test]
    fn test_clear_removes_token() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        store.save("secret-token").unwrap();
        store.clear();
        assert!(store.load().is_none());

        // Clearing an already-empty store is a no-op
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_trims_whitespace() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        std::fs::write(dir.path().join("token"), "  secret-token\n").unwrap();
        assert_eq!(store.load().as_deref(), Some("secret-token"));

        std::fs::write(dir.path().join("token"), "\n").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_creates_missing_data_dir() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested"));

        store.save("secret-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("secret-token"));
    }
}
