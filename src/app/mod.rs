//! Core application wiring
//!
//! This module builds the backend client and the session manager from the
//! configuration and exposes the two ways to talk to the assistant: the
//! interactive chat view and a one-shot question.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::{Backend, HttpBackend},
    auth::{SessionManager, TokenStore},
    chat::Conversation,
    config::Config,
    tui::ChatView,
};

/// Shown when a protected mode runs without a valid session
pub const NOT_LOGGED_IN: &str = "Not logged in. Run `marhaba login` first.";

/// Main application structure
pub struct App {
    config: Config,
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        debug!("Creating new App instance");

        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config)?);
        let store = TokenStore::new(&config.data_dir);
        let session = Arc::new(SessionManager::new(backend.clone(), store));

        Ok(Self {
            config,
            backend,
            session,
        })
    }

    /// Get the session manager
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Validate the stored token and require an authenticated session
    ///
    /// The terminal counterpart of redirecting to the login page: an
    /// expired or missing token produces no error of its own, just a
    /// pointer to `marhaba login`.
    pub async fn require_auth(&self) -> Result<()> {
        self.session.verify_token().await;
        if !self.session.is_authenticated().await {
            return Err(anyhow::anyhow!(NOT_LOGGED_IN));
        }
        Ok(())
    }

    /// Start the interactive chat view
    pub async fn run_interactive(&self) -> Result<()> {
        self.require_auth().await?;

        let conversation = Arc::new(Conversation::new(
            self.backend.clone(),
            self.session.clone(),
        ));
        let mut view = ChatView::new(conversation, self.config.data_dir.clone());
        view.run().await
    }

    /// Ask a single question and return the assistant's reply
    pub async fn run_non_interactive(&self, question: &str) -> Result<String> {
        self.require_auth().await?;

        let conversation = Conversation::new(self.backend.clone(), self.session.clone());
        let reply = conversation
            .submit(question)
            .await
            .ok_or_else(|| anyhow::anyhow!("No question provided"))?;
        Ok(reply.text)
    }
}
