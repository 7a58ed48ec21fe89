//! EIP-1193 provider module.
//!
//! [`PrivyProvider`] is the composition root consumed by downstream SDKs: a
//! single asynchronous `request({method, params})` entry point that answers
//! account and chain queries from configuration, delegates the three signing
//! methods to a [`WalletSigner`](crate::signer::WalletSigner), and proxies
//! everything else to a plain JSON-RPC node.

pub mod error;
pub mod router;

pub use error::{ProviderError, ProviderResult};
pub use router::PrivyProvider;
