//! Network registry for the Privy provider.
//!
//! Maps a numeric EVM chain id to its static metadata (display name, native
//! currency symbol, default public RPC endpoint). The table is immutable and
//! built once at process start; there is no dynamic registration.

use std::collections::HashMap;

use lazy_static::lazy_static;
use thiserror::Error;

/// Default base URL for the Privy custody API.
pub const DEFAULT_CUSTODY_API_URL: &str = "https://api.privy.io";

/// Static metadata for a supported EVM network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    /// Numeric chain id (EIP-155)
    pub chain_id: u64,
    /// Human-readable network name
    pub name: &'static str,
    /// Native currency symbol
    pub symbol: &'static str,
    /// Default public JSON-RPC endpoint
    pub rpc_url: &'static str,
}

/// Error returned when a chain id has no registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported chain id {chain_id}; supported chain ids: {supported:?}")]
pub struct UnsupportedChainError {
    /// The chain id that was requested
    pub chain_id: u64,
    /// All chain ids the registry knows about (sorted)
    pub supported: Vec<u64>,
}

lazy_static! {
    static ref CHAINS: HashMap<u64, Chain> = {
        let mut m = HashMap::new();
        for chain in [
            Chain {
                chain_id: 1,
                name: "Ethereum Mainnet",
                symbol: "ETH",
                rpc_url: "https://eth.llamarpc.com",
            },
            Chain {
                chain_id: 11155111,
                name: "Sepolia",
                symbol: "ETH",
                rpc_url: "https://rpc.sepolia.org",
            },
            Chain {
                chain_id: 8453,
                name: "Base",
                symbol: "ETH",
                rpc_url: "https://mainnet.base.org",
            },
        ] {
            m.insert(chain.chain_id, chain);
        }
        m
    };
}

/// Look up the registry entry for a chain id.
///
/// # Errors
///
/// Returns [`UnsupportedChainError`] naming the requested id and listing all
/// supported ids when no entry matches.
pub fn resolve(chain_id: u64) -> Result<&'static Chain, UnsupportedChainError> {
    CHAINS.get(&chain_id).ok_or_else(|| UnsupportedChainError {
        chain_id,
        supported: supported_chain_ids(),
    })
}

/// All chain ids present in the registry, sorted ascending.
pub fn supported_chain_ids() -> Vec<u64> {
    let mut ids: Vec<u64> = CHAINS.keys().copied().collect();
    ids.sort_unstable();
    ids
}

/// The CAIP-2 identifier for a chain id (`eip155:<id>`).
pub fn caip2(chain_id: u64) -> String {
    format!("eip155:{}", chain_id)
}
