//! Wire types for the guide backend API

use serde::{Deserialize, Serialize};

/// Bearer credential returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// User profile returned by the identity endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Some deployments rotate the credential on verification and return
    /// the replacement alongside the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Answer returned by the question-answering endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    #[serde(rename = "Answer")]
    pub answer: String,
}

/// Receipt returned by the registration endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterReceipt {
    pub status: String,
    pub message: String,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_response_field_is_capitalized() {
        let response: AnswerResponse =
            serde_json::from_str(r#"{"Answer": "The Blue City"}"#).unwrap();
        assert_eq!(response.answer, "The Blue City");
    }

    #[test]
    fn test_profile_without_rotated_token() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": "1", "name": "Amina", "email": "amina@example.com", "created_at": null}"#,
        )
        .unwrap();
        assert_eq!(profile.name, "Amina");
        assert!(profile.access_token.is_none());
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn test_profile_with_rotated_token() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": "1", "name": "Amina", "email": "amina@example.com",
                "created_at": "2025-03-01T10:00:00", "access_token": "rotated"}"#,
        )
        .unwrap();
        assert_eq!(profile.access_token.as_deref(), Some("rotated"));
    }

    #[test]
    fn test_token_response_roundtrip() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc", "token_type": "bearer"}"#).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, "bearer");
    }
}
