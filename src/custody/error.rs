//! Error types for the custody API client.

use thiserror::Error;

/// Error type for calls against the custody service.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials rejected (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid request parameters (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authorization signature rejected (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Wallet or resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side error (5xx)
    #[error("Custody service error: {0}")]
    ServerError(String),

    /// Unexpected HTTP status code
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),

    /// JSON deserialization error
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Authorization key material could not be parsed or used
    #[error("Authorization key error: {0}")]
    AuthorizationKey(String),
}

/// Result type alias for custody operations.
pub type CustodyResult<T> = Result<T, CustodyError>;

/// Error response format from the custody API.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[serde(alias = "error")]
    pub message: Option<String>,
    /// Machine-readable error code, when present
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Get the error message, falling back to the code.
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}
