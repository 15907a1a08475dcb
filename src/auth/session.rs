//! Session state and authentication operations

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    api::{ApiError, Backend, RegisterReceipt, TokenResponse, UserProfile},
    auth::store::TokenStore,
};

/// Message shown when the login endpoint rejects without a detail
const LOGIN_FALLBACK: &str = "Login Failed";

/// Message shown when the registration endpoint rejects without a detail
const REGISTER_FALLBACK: &str = "Registration Failed";

/// Process-wide authentication state
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Opaque bearer credential, if one is held
    pub token: Option<String>,
    /// Profile fetched on the last successful verification or login
    pub user: Option<UserProfile>,
    /// True only right after the backend accepted the current token
    pub authenticated: bool,
    /// Last human-readable auth failure, surfaced to the user
    pub error: Option<String>,
    /// True while an auth operation is in flight
    pub loading: bool,
}

/// A failed login or registration attempt
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
}

/// Owner of the session state
///
/// Constructed once at application start and shared by reference; every
/// mutation of the session and of the stored token happens here.
pub struct SessionManager {
    backend: Arc<dyn Backend>,
    store: TokenStore,
    state: Arc<RwLock<Session>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(backend: Arc<dyn Backend>, store: TokenStore) -> Self {
        Self {
            backend,
            store,
            state: Arc::new(RwLock::new(Session::default())),
        }
    }

    /// Get a copy of the current session state
    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    /// Get the current bearer token
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Whether the backend accepted the current token
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.authenticated
    }

    /// Validate any stored token against the identity endpoint
    ///
    /// Invoked once at startup. A missing token completes immediately; a
    /// rejected or unreachable one resolves as a silent logout with no
    /// user-visible error.
    pub async fn verify_token(&self) {
        self.state.write().await.loading = true;

        if let Some(saved) = self.store.load() {
            match self.backend.whoami(&saved).await {
                Ok(profile) => self.adopt_verified(saved, profile).await,
                Err(err) => {
                    debug!("Stored token failed verification: {}", err);
                    self.force_logout().await;
                }
            }
        }

        self.state.write().await.loading = false;
    }

    async fn adopt_verified(&self, saved: String, profile: UserProfile) {
        let token = match profile.access_token.as_deref() {
            Some(rotated) if rotated != saved => {
                // Persist the rotated credential before the old one is
                // dropped; a credential the store has not seen is never
                // held in memory.
                if let Err(err) = self.store.save(rotated) {
                    warn!("Failed to persist rotated token: {}", err);
                    self.force_logout().await;
                    return;
                }
                rotated.to_string()
            }
            _ => saved,
        };

        let mut state = self.state.write().await;
        state.token = Some(token);
        state.user = Some(profile);
        state.authenticated = true;
    }

    /// Exchange credentials for a bearer token and adopt it
    ///
    /// On rejection the backend's message (or a generic fallback) is
    /// recorded as the session error and nothing else changes.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AuthFailure> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.try_login(email, password).await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Err(failure) = &result {
            state.error = Some(failure.message.clone());
        }
        result
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<TokenResponse, AuthFailure> {
        let token = self
            .backend
            .login(email, password)
            .await
            .map_err(|err| AuthFailure {
                message: failure_message(&err, LOGIN_FALLBACK),
            })?;

        self.store
            .save(&token.access_token)
            .map_err(|err| AuthFailure {
                message: err.to_string(),
            })?;
        self.state.write().await.token = Some(token.access_token.clone());

        // Follow-up identity fetch. The token is retained even if this
        // fails; the session stays unauthenticated until the next
        // verification resolves it.
        match self.backend.whoami(&token.access_token).await {
            Ok(profile) => {
                let mut state = self.state.write().await;
                state.user = Some(profile);
                state.authenticated = true;
            }
            Err(err) => warn!("Profile fetch after login failed: {}", err),
        }

        Ok(token)
    }

    /// Create a new account
    ///
    /// Does not authenticate the caller; failure records the backend's
    /// message and mutates nothing else.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterReceipt, AuthFailure> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self
            .backend
            .create_user(name, email, password)
            .await
            .map_err(|err| AuthFailure {
                message: failure_message(&err, REGISTER_FALLBACK),
            });

        let mut state = self.state.write().await;
        state.loading = false;
        if let Err(failure) = &result {
            state.error = Some(failure.message.clone());
        }
        result
    }

    /// Drop the credential, in memory and on disk
    pub async fn logout(&self) {
        info!("Logging out, removing stored token");
        self.force_logout().await;
    }

    async fn force_logout(&self) {
        self.store.clear();
        let mut state = self.state.write().await;
        state.token = None;
        state.user = None;
        state.authenticated = false;
    }
}

/// Pick the user-facing message for a failed auth call
fn failure_message(err: &ApiError, fallback: &str) -> String {
    match err.detail() {
        Some(detail) => detail.to_string(),
        None if err.is_rejection() => fallback.to_string(),
        None => err.to_string(),
    }
}
