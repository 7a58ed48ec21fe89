//! Provider configuration.

use crate::credentials::CredentialRecord;
use crate::network;

/// Everything the provider and signing client need, supplied wholesale at
/// construction and never mutated.
///
/// No validation happens here beyond what the network registry and custody
/// service enforce: malformed values surface as failures from those
/// collaborators.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Custody service app id
    pub app_id: String,
    /// Custody service app secret
    pub app_secret: String,
    /// Wallet identifier issued by the custody service
    pub wallet_id: String,
    /// Blockchain address of the custodied key (hex)
    pub address: String,
    /// Base64-encoded private half of the authorization keypair
    pub authorization_private_key: String,
    /// JSON-RPC endpoint for proxied methods
    pub rpc_url: String,
    /// Numeric chain id (must be present in the network registry)
    pub chain_id: u64,
    /// Custody API base URL override; `None` uses the default
    pub custody_api_url: Option<String>,
}

impl ProviderConfig {
    /// Assemble a configuration from app credentials, a cached credential
    /// record, and a target network.
    ///
    /// Uses the registry's default RPC endpoint for the chain; override
    /// `rpc_url` afterwards to point at a different node.
    pub fn from_credentials(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        record: &CredentialRecord,
        chain_id: u64,
    ) -> Result<Self, network::UnsupportedChainError> {
        let chain = network::resolve(chain_id)?;
        Ok(Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            wallet_id: record.wallet_id.clone(),
            address: record.address.clone(),
            authorization_private_key: record.auth_private_key.clone(),
            rpc_url: chain.rpc_url.to_string(),
            chain_id,
            custody_api_url: None,
        })
    }
}
