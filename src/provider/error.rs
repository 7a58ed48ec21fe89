//! Error types for the provider surface.

use thiserror::Error;

use crate::custody::CustodyError;
use crate::network::UnsupportedChainError;

/// Error type for provider construction and `request` calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Construction-time configuration error (unsupported chain id)
    #[error(transparent)]
    Config(#[from] UnsupportedChainError),

    /// Missing or wrong-shaped parameters for a directly handled method
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A proxied JSON-RPC call returned an error object
    #[error("RPC error calling {method}: {message}")]
    Rpc {
        /// The forwarded method name
        method: String,
        /// The node's error message
        message: String,
    },

    /// A remote signing operation failed
    #[error(transparent)]
    Custody(#[from] CustodyError),

    /// HTTP/network error talking to the JSON-RPC endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
