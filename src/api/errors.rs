//! Error types for backend API calls

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend explicitly denied the request with a non-success status.
    #[error("{}", .detail.as_deref().unwrap_or("request rejected by backend"))]
    Rejected { status: u16, detail: Option<String> },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the backend answered and said no, as opposed to the
    /// request never completing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    /// The human-readable message the backend attached to a rejection.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display_uses_detail() {
        let err = ApiError::Rejected {
            status: 401,
            detail: Some("Incorrect Email and/or Password".to_string()),
        };
        assert_eq!(err.to_string(), "Incorrect Email and/or Password");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_rejection_display_without_detail() {
        let err = ApiError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "request rejected by backend");
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_config_error_is_not_rejection() {
        let err = ApiError::Config("base URL is empty".to_string());
        assert!(!err.is_rejection());
    }
}
