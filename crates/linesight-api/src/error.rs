//! Error types for API client operations.

use thiserror::Error;

/// Errors from talking to the LineSight backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, as returned by the server.
        body: String,
    },

    /// The request never completed (connection, TLS, decode).
    #[error("network error: {0}")]
    Network(String),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A payload failed to parse as JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The request was rejected before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// A display-grade message for toasts and summaries.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, .. } => {
                format!("The server rejected the request (HTTP {status}).")
            }
            Self::Network(_) => {
                "Could not reach the LineSight backend. Check your connection.".to_string()
            }
            Self::Io(_) => "Could not read the file to upload.".to_string(),
            Self::JsonParse(_) => "The server sent a response we could not read.".to_string(),
            Self::InvalidRequest(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_carry_status_and_body() {
        let err = ApiError::Status {
            status: 422,
            body: "{\"detail\": \"time_column is required\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("time_column"));
        assert!(err.user_message().contains("422"));
    }

    #[test]
    fn user_messages_avoid_internals() {
        let err = ApiError::Network("dns error: failed to lookup".to_string());
        assert!(!err.user_message().contains("dns"));
    }
}
