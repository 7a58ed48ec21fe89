//! Signing interface over the custody service.
//!
//! [`WalletSigner`] is the seam between the provider's method dispatch and
//! whatever actually produces signatures. [`SigningClient`] is the production
//! implementation: it binds a custody client, a wallet id, and the
//! authorization key into a network-scoped signer. Implement the trait to
//! substitute a different signing mode (or a stub in tests).

use std::future::Future;

use crate::config::ProviderConfig;
use crate::custody::{
    AuthorizationKey, CustodyClient, CustodyResult, SendTransactionParams, SignMessageParams,
    SignTypedDataParams, WalletRpcRequest,
};
use crate::network;
use crate::provider::ProviderError;
use crate::rpc::{TransactionRequest, TypedData};

/// A signing-capable account abstraction: send transactions, sign raw
/// messages, sign typed data.
pub trait WalletSigner {
    /// Sign and broadcast a transaction; returns the transaction hash.
    fn send_transaction(
        &self,
        transaction: &TransactionRequest,
    ) -> impl Future<Output = CustodyResult<String>> + Send;

    /// Sign raw message bytes (EIP-191 personal sign); returns the signature.
    fn sign_message(&self, message: &[u8]) -> impl Future<Output = CustodyResult<String>> + Send;

    /// Sign an EIP-712 typed-data payload; returns the signature.
    fn sign_typed_data(
        &self,
        typed_data: &TypedData,
    ) -> impl Future<Output = CustodyResult<String>> + Send;
}

/// Remote signer backed by a custodied wallet.
///
/// Each operation delegates to the custody service's wallet RPC endpoint,
/// proving its authority with the stored authorization key. Transactions are
/// scoped to the configured network via its CAIP-2 identifier.
#[derive(Debug, Clone)]
pub struct SigningClient {
    custody: CustodyClient,
    wallet_id: String,
    address: String,
    auth_key: AuthorizationKey,
    caip2: String,
}

impl SigningClient {
    /// Build a signing client from the provider configuration.
    ///
    /// Fails fast on an unsupported chain id or unparsable authorization
    /// key material.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let chain = network::resolve(config.chain_id)?;
        let auth_key = AuthorizationKey::from_base64(&config.authorization_private_key)?;

        let mut builder = CustodyClient::builder(&config.app_id, &config.app_secret);
        if let Some(url) = &config.custody_api_url {
            builder = builder.base_url(url);
        }
        let custody = builder.build()?;

        Ok(Self {
            custody,
            wallet_id: config.wallet_id.clone(),
            address: config.address.clone(),
            auth_key,
            caip2: network::caip2(chain.chain_id),
        })
    }

    /// The wallet's blockchain address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The CAIP-2 network scope transactions are bound to.
    pub fn caip2(&self) -> &str {
        &self.caip2
    }
}

impl WalletSigner for SigningClient {
    async fn send_transaction(&self, transaction: &TransactionRequest) -> CustodyResult<String> {
        let request = WalletRpcRequest {
            method: "eth_sendTransaction",
            caip2: Some(self.caip2.clone()),
            chain_type: "ethereum",
            params: SendTransactionParams {
                transaction: transaction.clone(),
            },
        };
        self.custody
            .wallet_rpc(&self.wallet_id, Some(&self.auth_key), &request)
            .await?
            .into_hash()
    }

    async fn sign_message(&self, message: &[u8]) -> CustodyResult<String> {
        let request = WalletRpcRequest {
            method: "personal_sign",
            caip2: None,
            chain_type: "ethereum",
            params: SignMessageParams {
                message: hex::encode(message),
                encoding: "hex",
            },
        };
        self.custody
            .wallet_rpc(&self.wallet_id, Some(&self.auth_key), &request)
            .await?
            .into_signature()
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> CustodyResult<String> {
        let request = WalletRpcRequest {
            method: "eth_signTypedData_v4",
            caip2: None,
            chain_type: "ethereum",
            params: SignTypedDataParams {
                typed_data: typed_data.clone(),
            },
        };
        self.custody
            .wallet_rpc(&self.wallet_id, Some(&self.auth_key), &request)
            .await?
            .into_signature()
    }
}
