//! Error Types
//!
//! One error enum for every failure a page can display, plus the single
//! normalisation into a human-readable banner text.

use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response was received
    #[error("Ошибка сети или соединения: {0}")]
    Network(String),

    /// Non-success HTTP status, with the server's `message` when it sent one
    #[error("HTTP {status}")]
    Http { status: u16, message: Option<String> },

    /// 401, already handled by the client (session cleared, redirected)
    #[error("Сессия истекла. Пожалуйста, войдите снова.")]
    Unauthorized,

    /// Client-side validation failure
    #[error("{0}")]
    Validation(String),

    /// Expected fields absent or the body could not be decoded
    #[error("{0}")]
    MalformedResponse(String),
}

/// Shape of a backend error body
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiError {
    /// Build an HTTP error from a response body, keeping the server message if any
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| parsed.errors.as_ref().and_then(first_field_error));

        ApiError::Http { status, message }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Display text for an error banner.
    ///
    /// Precedence: server message, then validation/malformed text, then
    /// `"{context} ({status})"`, then the transport text.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ApiError::Http { message: Some(message), .. } => message.clone(),
            ApiError::Http { status, message: None } => format!("{} ({})", context, status),
            ApiError::Validation(message) | ApiError::MalformedResponse(message) => message.clone(),
            ApiError::Network(_) | ApiError::Unauthorized => self.to_string(),
        }
    }
}

fn first_field_error(errors: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    errors.values().find_map(|value| match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.iter().find_map(|v| v.as_str().map(String::from)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let err = ApiError::from_error_body(422, br#"{"message":"Email already taken"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.user_message("Ошибка при создании пользователя"), "Email already taken");
    }

    #[test]
    fn test_field_errors_used_without_message() {
        let err = ApiError::from_error_body(422, br#"{"errors":{"email":["The email field is required."]}}"#);
        assert_eq!(err.user_message("ctx"), "The email field is required.");
    }

    #[test]
    fn test_bare_status_uses_context() {
        let err = ApiError::from_error_body(500, b"<html>oops</html>");
        assert_eq!(err.user_message("Ошибка загрузки"), "Ошибка загрузки (500)");
    }

    #[test]
    fn test_network_uses_transport_text() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("ignored"), "Ошибка сети или соединения: connection refused");
    }

    #[test]
    fn test_validation_text_passes_through() {
        let err = ApiError::validation("Заполните все обязательные поля");
        assert_eq!(err.user_message("ignored"), "Заполните все обязательные поля");
        assert_eq!(err.status(), None);
    }
}
