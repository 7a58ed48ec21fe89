//! # Privy Provider SDK
//!
//! An EIP-1193 style provider backed by a Privy server wallet: the
//! blockchain signing key lives in the custody service, and this crate
//! translates a small fixed set of wallet RPC methods into remote-signing
//! calls while proxying everything else to a plain JSON-RPC node.
//!
//! ## Modules
//!
//! - [`provider`]: the request router (the provider surface itself)
//! - [`signer`]: the signing seam and the custody-backed signing client
//! - [`custody`]: REST client for the custody wallet API
//! - [`credentials`]: credential file cache and load-or-create lifecycle
//! - [`network`]: static chain-id registry
//! - [`rpc`]: shared JSON-RPC wire types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use privy_provider::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // First run provisions a wallet and caches it in .privy-wallet.json;
//!     // later runs reuse the cached record as-is.
//!     let custody = CustodyClient::new("app-id", "app-secret")?;
//!     let record = load_or_create(&custody, None).await?;
//!
//!     let config = ProviderConfig::from_credentials("app-id", "app-secret", &record, 11155111)?;
//!     let provider = PrivyProvider::new(config)?;
//!
//!     let accounts = provider.request(RpcRequest::new("eth_accounts")).await?;
//!     println!("Accounts: {}", accounts);
//!
//!     // Unhandled methods are proxied to the JSON-RPC endpoint verbatim.
//!     let block = provider.request(RpcRequest::new("eth_blockNumber")).await?;
//!     println!("Block: {}", block);
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Provider configuration supplied wholesale at construction.
pub mod config;

/// Credential file cache and load-or-create lifecycle.
pub mod credentials;

/// REST client for the custody wallet API.
pub mod custody;

/// Static network registry (chain id → chain metadata).
pub mod network;

/// EIP-1193 provider: method dispatch plus the JSON-RPC proxy.
pub mod provider;

/// Shared Ethereum JSON-RPC wire types.
pub mod rpc;

/// Signing seam and the custody-backed signing client.
pub mod signer;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use privy_provider::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ProviderConfig;
    pub use crate::credentials::{
        create_new, generate_authorization_keypair, load_or_create, CredentialError,
        CredentialRecord, CredentialResult, WalletProvisioner, DEFAULT_CREDENTIAL_FILE,
    };
    pub use crate::custody::{
        AuthorizationKey, CustodyClient, CustodyClientBuilder, CustodyError, CustodyResult,
        ProvisionedWallet,
    };
    pub use crate::network::{
        resolve, supported_chain_ids, Chain, UnsupportedChainError, DEFAULT_CUSTODY_API_URL,
    };
    pub use crate::provider::{PrivyProvider, ProviderError, ProviderResult};
    pub use crate::rpc::{Quantity, RpcRequest, TransactionRequest, TypedData};
    pub use crate::signer::{SigningClient, WalletSigner};
}
