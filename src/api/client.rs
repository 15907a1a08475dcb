//! Backend trait and HTTP client for the guide API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::{
    api::{
        errors::{ApiError, ApiResult},
        types::{AnswerResponse, RegisterReceipt, TokenResponse, UserProfile},
    },
    config::Config,
    version,
};

/// Trait for the guide backend
///
/// The session manager and the conversation loop only ever see this trait,
/// so tests can swap the HTTP client for an in-process double.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the profile belonging to a bearer token
    async fn whoami(&self, token: &str) -> ApiResult<UserProfile>;

    /// Exchange credentials for a bearer token
    async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse>;

    /// Create a new account; does not authenticate the caller
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<RegisterReceipt>;

    /// Ask the travel assistant a question
    async fn ask(&self, token: &str, query: &str) -> ApiResult<String>;

    /// Persist one exchanged question/answer pair
    async fn save_conversation(&self, token: &str, query: &str, response: &str) -> ApiResult<()>;
}

/// Client options for the HTTP backend
///
/// No retry settings: every request is a single attempt, and no timeout is
/// enforced unless one is configured.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: version::user_agent(),
            timeout: None,
        }
    }
}

/// HTTP implementation of [`Backend`] built on reqwest
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a new HTTP backend from the application configuration
    pub fn new(config: &Config) -> ApiResult<Self> {
        let options = ClientOptions {
            timeout: config.request_timeout.map(Duration::from_secs),
            ..ClientOptions::default()
        };
        Self::with_options(&config.base_url, options)
    }

    /// Create a new HTTP backend with explicit client options
    pub fn with_options(base_url: &str, options: ClientOptions) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("Base URL is required".to_string()));
        }

        let mut builder = Client::builder().user_agent(&options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Get the URL of one API endpoint
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Read a success body, or turn a non-success response into a rejection
    async fn read_json<T>(response: reqwest::Response) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// Extract the backend's `detail` message from a rejected response
    async fn rejection(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let detail = match response.text().await {
            Ok(text) => serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(|d| d.as_str())
                        .map(str::to_string)
                }),
            Err(_) => None,
        };
        ApiError::Rejected { status, detail }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn whoami(&self, token: &str) -> ApiResult<UserProfile> {
        debug!("Fetching profile from {}", self.endpoint("me"));
        let response = self
            .client
            .get(self.endpoint("me"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        // The login endpoint takes an OAuth2-style form submission where
        // the username field carries the email address.
        let response = self
            .client
            .post(self.endpoint("login"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<RegisterReceipt> {
        let response = self
            .client
            .post(self.endpoint("createUser"))
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn ask(&self, token: &str, query: &str) -> ApiResult<String> {
        let response = self
            .client
            .post(self.endpoint("tourist"))
            .bearer_auth(token)
            .json(&json!({ "query": query }))
            .send()
            .await?;
        let answer: AnswerResponse = Self::read_json(response).await?;
        Ok(answer.answer)
    }

    async fn save_conversation(&self, token: &str, query: &str, response: &str) -> ApiResult<()> {
        let reply = self
            .client
            .post(self.endpoint("saveConversation"))
            .bearer_auth(token)
            .json(&json!({
                "query": query,
                "response": response,
            }))
            .send()
            .await?;
        if reply.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(reply).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let backend =
            HttpBackend::with_options("http://localhost:8000", ClientOptions::default()).unwrap();
        assert_eq!(backend.endpoint("me"), "http://localhost:8000/api/me");
        assert_eq!(
            backend.endpoint("saveConversation"),
            "http://localhost:8000/api/saveConversation"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend =
            HttpBackend::with_options("http://localhost:8000/", ClientOptions::default()).unwrap();
        assert_eq!(backend.endpoint("login"), "http://localhost:8000/api/login");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let result = HttpBackend::with_options("", ClientOptions::default());
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_default_options_have_no_timeout() {
        let options = ClientOptions::default();
        assert!(options.timeout.is_none());
        assert!(options.user_agent.starts_with("marhaba/"));
    }
}
