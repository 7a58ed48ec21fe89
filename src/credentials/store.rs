//! Credential file read/write.
//!
//! One JSON object per file, human-readable (2-space indentation, stable key
//! order, trailing newline). A missing file is a valid "not found" result;
//! unparsable content is an error. There is no locking — concurrent writers
//! race and the last writer wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialError, CredentialResult};

/// Default credential file name, resolved against the working directory.
pub const DEFAULT_CREDENTIAL_FILE: &str = ".privy-wallet.json";

/// The persisted unit identifying a provisioned wallet and its authorization
/// keypair.
///
/// Wallet id and address are issued together by the custody service at
/// creation time and never change afterward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Opaque wallet identifier issued by the custody service
    pub wallet_id: String,
    /// Blockchain address of the custodied key (hex)
    pub address: String,
    /// Base64-encoded PKCS#8 private half of the authorization keypair
    pub auth_private_key: String,
    /// Base64-encoded SPKI public half of the authorization keypair
    pub auth_public_key: String,
    /// Creation timestamp (ISO-8601)
    pub created_at: DateTime<Utc>,
}

/// Resolve an optional path to an absolute credential file path.
fn resolve_path(path: Option<&Path>) -> CredentialResult<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIAL_FILE));
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Load the credential record from the given path (or the default file).
///
/// Returns `Ok(None)` when no file exists at the resolved path.
///
/// # Errors
///
/// [`CredentialError::Corrupt`] when the file exists but does not parse as a
/// credential record; [`CredentialError::Io`] on read failures.
pub fn load(path: Option<&Path>) -> CredentialResult<Option<CredentialRecord>> {
    let path = resolve_path(path)?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no credential file found");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let record = serde_json::from_str(&contents)
        .map_err(|source| CredentialError::Corrupt { path, source })?;
    Ok(Some(record))
}

/// Write the credential record to the given path (or the default file),
/// overwriting any existing content.
pub fn save(record: &CredentialRecord, path: Option<&Path>) -> CredentialResult<()> {
    let path = resolve_path(path)?;
    let mut contents = serde_json::to_string_pretty(record)?;
    contents.push('\n');
    std::fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), wallet_id = %record.wallet_id, "credential file written");
    Ok(())
}
