//! Credential lifecycle: load-or-create orchestration.
//!
//! First run generates a local authorization keypair, asks the custody
//! service to provision a wallet owned by its public half, and caches the
//! result in the credential file. Every later run loads the cached record
//! as-is, with no freshness check against the service.

use std::future::Future;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use p256::ecdsa::SigningKey;
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey};

use crate::credentials::store::{self, CredentialRecord};
use crate::credentials::{CredentialError, CredentialResult};
use crate::custody::{CustodyClient, CustodyResult, ProvisionedWallet};

/// Anything that can provision a custodied wallet for an owner key.
///
/// [`CustodyClient`] is the production implementation; tests substitute a
/// stub to observe how often provisioning is invoked.
pub trait WalletProvisioner {
    /// Create a new custodied wallet owned by the given authorization public
    /// key (base64 SPKI).
    fn create_wallet(
        &self,
        owner_public_key: &str,
    ) -> impl Future<Output = CustodyResult<ProvisionedWallet>> + Send;
}

impl WalletProvisioner for CustodyClient {
    fn create_wallet(
        &self,
        owner_public_key: &str,
    ) -> impl Future<Output = CustodyResult<ProvisionedWallet>> + Send {
        CustodyClient::create_wallet(self, owner_public_key)
    }
}

/// A freshly generated authorization keypair, base64-encoded.
#[derive(Debug, Clone)]
pub struct AuthorizationKeypair {
    /// Base64(PKCS#8 DER) private half
    pub private_key: String,
    /// Base64(SPKI DER) public half
    pub public_key: String,
}

/// Generate a fresh P-256 authorization keypair. Local only; no network.
pub fn generate_authorization_keypair() -> CredentialResult<AuthorizationKeypair> {
    let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
    let private_der = signing_key
        .to_pkcs8_der()
        .map_err(|e| CredentialError::Keypair(e.to_string()))?;
    let public_der = signing_key
        .verifying_key()
        .to_public_key_der()
        .map_err(|e| CredentialError::Keypair(e.to_string()))?;

    Ok(AuthorizationKeypair {
        private_key: BASE64.encode(private_der.as_bytes()),
        public_key: BASE64.encode(public_der.as_bytes()),
    })
}

/// Provision a brand-new credential set.
///
/// Generates an authorization keypair, asks the custody service for a wallet
/// owned by its public half, and combines both into a credential record
/// stamped with the current time. If provisioning fails the keypair is
/// discarded; nothing is persisted.
pub async fn create_new<P: WalletProvisioner>(
    provisioner: &P,
) -> CredentialResult<CredentialRecord> {
    let keypair = generate_authorization_keypair()?;
    let wallet = provisioner.create_wallet(&keypair.public_key).await?;

    tracing::debug!(wallet_id = %wallet.id, address = %wallet.address, "provisioned new custodied wallet");
    Ok(CredentialRecord {
        wallet_id: wallet.id,
        address: wallet.address,
        auth_private_key: keypair.private_key,
        auth_public_key: keypair.public_key,
        created_at: Utc::now(),
    })
}

/// Load the cached credential record, creating and persisting one on a miss.
///
/// A load hit is returned as-is. On a miss this calls [`create_new`], saves
/// the record, and returns it.
///
/// Not safe for concurrent first-run callers sharing one path: two
/// simultaneous misses each provision a distinct remote wallet and the
/// second save overwrites the first record.
pub async fn load_or_create<P: WalletProvisioner>(
    provisioner: &P,
    path: Option<&Path>,
) -> CredentialResult<CredentialRecord> {
    if let Some(record) = store::load(path)? {
        tracing::debug!(wallet_id = %record.wallet_id, "using cached wallet credentials");
        return Ok(record);
    }

    let record = create_new(provisioner).await?;
    store::save(&record, path)?;
    Ok(record)
}
