//! Error types for motormate-api

use thiserror::Error;

/// Result type alias using motormate-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the chat endpoint
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection refused, reset, body read failure)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {status} ({message})")]
    Status { status: u16, message: String },

    /// Endpoint URL could not be used
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl Error {
    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server was reached but rejected or failed the request
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_some_and(|s| s >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_from_status_variant() {
        let e = Error::status(500, "Internal server error");
        assert_eq!(e.status_code(), Some(500));
        assert!(e.is_server_error());
    }

    #[test]
    fn test_client_error_is_not_server_error() {
        let e = Error::status(400, "Empty message");
        assert_eq!(e.status_code(), Some(400));
        assert!(!e.is_server_error());
    }

    #[test]
    fn test_no_status_for_local_errors() {
        let e = Error::InvalidEndpoint("ftp://nope".into());
        assert_eq!(e.status_code(), None);
        assert!(!e.is_server_error());
    }

    #[test]
    fn test_status_display_mentions_code() {
        let e = Error::status(503, "busy");
        let text = e.to_string();
        assert!(text.contains("503"), "got: {}", text);
        assert!(text.contains("busy"), "got: {}", text);
    }
}
