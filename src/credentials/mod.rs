//! Credential persistence and lifecycle.
//!
//! A provisioned wallet is identified by a small credential record (wallet
//! id, address, authorization keypair, creation time) cached in a JSON file.
//! The file is the sole source of truth: nothing is cached in memory across
//! invocations, and a record is never mutated after creation — only
//! overwritten wholesale by a fresh create.

pub mod lifecycle;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

use crate::custody::CustodyError;

pub use lifecycle::{
    create_new, generate_authorization_keypair, load_or_create, AuthorizationKeypair,
    WalletProvisioner,
};
pub use store::{load, save, CredentialRecord, DEFAULT_CREDENTIAL_FILE};

/// Error type for credential store and lifecycle operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// File system error while reading or writing the credential file
    #[error("credential file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The credential file exists but does not parse as a credential record
    #[error("corrupt credential file {path}: {source}")]
    Corrupt {
        /// Resolved path of the offending file
        path: PathBuf,
        /// The underlying parse error
        source: serde_json::Error,
    },

    /// Record serialization error
    #[error("credential serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Local keypair generation/encoding error
    #[error("authorization keypair error: {0}")]
    Keypair(String),

    /// The custody service was unreachable or rejected wallet creation
    #[error("custody service error: {0}")]
    Custody(#[from] CustodyError),
}

/// Result type alias for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;
