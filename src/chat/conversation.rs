//! Conversation management and message handling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::{api::Backend, auth::SessionManager};

/// Reply shown in place of an answer when the exchange fails
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// One message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A conversation instance owning the exchanged messages
///
/// Messages live only as long as the instance; the backend's save
/// endpoint is the durable record and is never read back.
pub struct Conversation {
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    messages: Arc<RwLock<Vec<ChatMessage>>>,
    pending: Arc<RwLock<bool>>,
}

impl Conversation {
    /// Create a new, empty conversation
    pub fn new(backend: Arc<dyn Backend>, session: Arc<SessionManager>) -> Self {
        Self {
            backend,
            session,
            messages: Arc::new(RwLock::new(Vec::new())),
            pending: Arc::new(RwLock::new(false)),
        }
    }

    /// Submit a user question and exchange it for an answer
    ///
    /// Empty input and submissions made while an exchange is in flight
    /// are ignored. Otherwise the user message is appended immediately,
    /// and exactly one assistant message follows before the method
    /// returns it: the real answer, or [`ERROR_REPLY`] when the call
    /// fails. The pending gate is released on every path.
    pub async fn submit(&self, input: &str) -> Option<ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        {
            let mut pending = self.pending.write().await;
            if *pending {
                debug!("Exchange already in flight, ignoring submission");
                return None;
            }
            *pending = true;
        }

        self.messages.write().await.push(ChatMessage::user(text));

        let reply = self.fetch_response(text).await;
        self.messages.write().await.push(reply.clone());

        *self.pending.write().await = false;
        Some(reply)
    }

    /// Ask the backend and turn the outcome into an assistant message
    async fn fetch_response(&self, query: &str) -> ChatMessage {
        let token = self.session.token().await.unwrap_or_default();

        match self.backend.ask(&token, query).await {
            Ok(answer) => {
                self.spawn_save(token, query.to_string(), answer.clone());
                ChatMessage::assistant(answer)
            }
            Err(err) => {
                error!("Failed to fetch an answer: {}", err);
                ChatMessage::assistant(ERROR_REPLY)
            }
        }
    }

    /// Persist one exchange in the background
    ///
    /// Best-effort: failures are logged, never surfaced, never retried,
    /// and the task is not ordered against later submissions.
    fn spawn_save(&self, token: String, query: String, answer: String) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            match backend.save_conversation(&token, &query, &answer).await {
                Ok(()) => debug!("Conversation exchange saved"),
                Err(err) => warn!("Failed to save the conversation: {}", err),
            }
        });
    }

    /// Get all messages exchanged so far
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Whether an exchange is currently in flight
    pub async fn is_pending(&self) -> bool {
        *self.pending.read().await
    }

    /// Drop the local messages; the backend's record is untouched
    pub async fn clear(&self) {
        self.messages.write().await.clear();
    }
}
