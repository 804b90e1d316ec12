//! Error types for the chat backend

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Result type for model calls
pub type Result<T> = std::result::Result<T, ModelError>;

/// Failure talking to the language model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

/// Failure answering a request, rendered as `{ error, detail?, success: false }`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    #[error("Invalid JSON body")]
    InvalidJson(String),

    #[error("Request body too large")]
    PayloadTooLarge(String),

    #[error("No message provided")]
    NoMessage,

    #[error("Empty message")]
    EmptyMessage,

    #[error("An error occurred while processing your request. Please try again.")]
    Internal(String),

    #[error("Error generating response")]
    Generation(#[from] ModelError),

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidJson(_) | ApiError::NoMessage | ApiError::EmptyMessage => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) | ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Extra context for the caller
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::InvalidJson(detail)
            | ApiError::PayloadTooLarge(detail)
            | ApiError::Internal(detail) => Some(detail.clone()),
            ApiError::Generation(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::PayloadTooLarge(other.body_text())
            }
            other => ApiError::InvalidJson(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, detail = ?self.detail(), "chat request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "rejected request");
        }

        let mut body = json!({
            "error": self.to_string(),
            "success": false,
        });
        if let Some(detail) = self.detail() {
            body["detail"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(ApiError::EmptyMessage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        let generation = ApiError::from(ModelError::InvalidResponse("no message".into()));
        assert_eq!(generation.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_detail_only_where_useful() {
        assert_eq!(ApiError::NoMessage.detail(), None);
        let generation = ApiError::from(ModelError::Status {
            status: 404,
            message: "model 'mistral' not found".into(),
        });
        assert_eq!(
            generation.detail().as_deref(),
            Some("model server returned 404: model 'mistral' not found")
        );
    }
}
