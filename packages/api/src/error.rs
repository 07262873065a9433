//! # Error taxonomy for every client call
//!
//! | Variant | Raised when | Network touched? |
//! |---------|-------------|------------------|
//! | [`ApiError::Validation`] | form input rejected locally | no |
//! | [`ApiError::NotSignedIn`] | a mutating call is made without a token | no |
//! | [`ApiError::Unauthorized`] | the server answered 401; the session is already cleared | yes |
//! | [`ApiError::Http`] | any other non-success status | yes |
//! | [`ApiError::Network`] | the request never got an answer | yes |
//! | [`ApiError::Decode`] | the answer was not the expected JSON | yes |
//! | [`ApiError::Upload`] | the media host rejected an upload | yes |
//!
//! Nothing here is fatal. UI code shows [`ApiError::user_message`] inline for
//! validation failures and as a transient notification otherwise.

use serde_json::Value;
use thiserror::Error;

/// Shown when the server gave no usable message.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when a 401 carried no message.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Shown for transport failures.
pub const NETWORK_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("sign in required")]
    NotSignedIn,

    #[error("unauthorized: {}", .message.as_deref().unwrap_or(SESSION_EXPIRED_MESSAGE))]
    Unauthorized { message: Option<String> },

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or(GENERIC_MESSAGE))]
    Http { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("upload failed: {0}")]
    Upload(String),
}

impl ApiError {
    /// HTTP status of the failed call, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the error was produced before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::Validation(_) | ApiError::NotSignedIn)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Text to put in front of the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::NotSignedIn => "Please sign in to continue.".to_string(),
            ApiError::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
            ApiError::Http { message, .. } => {
                message.clone().unwrap_or_else(|| GENERIC_MESSAGE.to_string())
            }
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Decode(_) => GENERIC_MESSAGE.to_string(),
            ApiError::Upload(message) => message.clone(),
        }
    }

    /// Build the error for a non-success response.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Http { status, message }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Pull the human-readable message out of an error body.
///
/// Accepts `{"detail": "..."}`, the validation form
/// `{"detail": [{"msg": "..."}, ...]}` and `{"message": "..."}`.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("detail") {
        Some(Value::String(detail)) => Some(detail.clone()),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    };
    message.filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_verbatim() {
        let err = ApiError::from_status(400, r#"{"detail":"Email already registered"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.user_message(), "value is not a valid email address");
    }

    #[test]
    fn test_message_field() {
        let err = ApiError::from_status(500, r#"{"message":"database offline"}"#);
        assert_eq!(err.user_message(), "database offline");
    }

    #[test]
    fn test_unusable_bodies_fall_back() {
        for body in ["", "<html>Bad Gateway</html>", r#"{"detail":""}"#, r#"{"error":1}"#] {
            let err = ApiError::from_status(502, body);
            assert_eq!(err.user_message(), GENERIC_MESSAGE, "body: {body}");
        }
    }

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_status(401, r#"{"detail":"Incorrect email or password"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Incorrect email or password");

        let bare = ApiError::from_status(401, "");
        assert_eq!(bare.user_message(), SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn test_local_errors() {
        assert!(ApiError::NotSignedIn.is_local());
        assert!(ApiError::Validation("x".into()).is_local());
        assert!(!ApiError::Network("reset".into()).is_local());
        assert_eq!(ApiError::Network("reset".into()).user_message(), NETWORK_MESSAGE);
    }
}
