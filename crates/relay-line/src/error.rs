//! Error types for relay-line

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// relay-line error type
#[derive(Error, Debug)]
pub enum LineError {
    #[error("LINE API error: {0}")]
    ApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Completion failed: {0}")]
    Completion(#[from] relay_core::Error),

    #[error("Missing X-Line-Signature header")]
    MissingSignature,

    #[error("Invalid signature. signature={0}")]
    InvalidSignature(String),

    #[error("Request body is not valid UTF-8")]
    InvalidEncoding,

    #[error("Invalid webhook body: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Webhook server error: {0}")]
    Webhook(String),
}

impl LineError {
    /// HTTP status reported to the webhook caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSignature
            | Self::InvalidSignature(_)
            | Self::InvalidEncoding
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LineError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        assert_eq!(LineError::MissingSignature.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            LineError::InvalidSignature("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(LineError::InvalidEncoding.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            LineError::InvalidBody("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_errors_map_to_server_error() {
        let err = LineError::Completion(relay_core::Error::CompletionApi("503".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            LineError::ApiError("400: Invalid reply token".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_signature_message() {
        let err = LineError::InvalidSignature("bogus".to_string());
        assert_eq!(err.to_string(), "Invalid signature. signature=bogus");
    }
}
