//! Custody service client module.
//!
//! REST client for the remote custody API: wallet provisioning and wallet
//! RPC (remote signing) calls. The custodied blockchain key never leaves the
//! service; requests prove their authority with the app credentials plus an
//! authorization signature from the locally held keypair.

pub mod client;
pub mod error;
pub mod types;

pub use client::{AuthorizationKey, CustodyClient, CustodyClientBuilder};
pub use error::{CustodyError, CustodyResult, ErrorResponse};
pub use types::{
    CreateWalletRequest, ProvisionedWallet, SendTransactionParams, SignMessageParams,
    SignTypedDataParams, WalletOwner, WalletRpcData, WalletRpcRequest, WalletRpcResponse,
};
