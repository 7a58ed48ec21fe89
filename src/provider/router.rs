//! The EIP-1193 request router.
//!
//! A small closed set of methods is handled directly (cached account info
//! and the three signing operations); every other method is forwarded
//! verbatim as a JSON-RPC POST to the configured endpoint.

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::network;
use crate::provider::error::{ProviderError, ProviderResult};
use crate::rpc::{JsonRpcRequest, JsonRpcResponse, RpcRequest, TransactionRequest, TypedData};
use crate::signer::{SigningClient, WalletSigner};

/// EIP-1193 style provider backed by a custodied wallet.
///
/// Construction resolves the configured network, so an unsupported chain id
/// fails here rather than on first use. The provider itself is stateless:
/// every [`request`](PrivyProvider::request) is an independent unit of work
/// with no ordering guarantees between concurrent calls.
#[derive(Debug, Clone)]
pub struct PrivyProvider<S = SigningClient> {
    signer: S,
    address: String,
    chain_id: u64,
    rpc_url: String,
    http_client: Client,
}

impl PrivyProvider<SigningClient> {
    /// Create a provider with the default custody-backed signing client.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let signer = SigningClient::new(&config)?;
        Self::with_signer(signer, &config)
    }
}

impl<S: WalletSigner> PrivyProvider<S> {
    /// Create a provider around a custom [`WalletSigner`].
    pub fn with_signer(signer: S, config: &ProviderConfig) -> ProviderResult<Self> {
        network::resolve(config.chain_id)?;
        let http_client = Client::builder().build()?;

        Ok(Self {
            signer,
            address: config.address.clone(),
            chain_id: config.chain_id,
            rpc_url: config.rpc_url.clone(),
            http_client,
        })
    }

    /// The configured wallet address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The configured chain id.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Handle a single provider request.
    ///
    /// Account and chain queries answer from configuration without I/O; the
    /// three signing methods delegate to the signer; everything else is
    /// proxied to the JSON-RPC endpoint.
    pub async fn request(&self, request: RpcRequest) -> ProviderResult<Value> {
        tracing::debug!(method = %request.method, "provider request");
        match request.method.as_str() {
            "eth_accounts" | "eth_requestAccounts" => Ok(json!([self.address])),

            "eth_chainId" => Ok(Value::String(format!("0x{:x}", self.chain_id))),

            "eth_sendTransaction" => {
                let transaction: TransactionRequest =
                    serde_json::from_value(param_at(&request, 0)?.clone()).map_err(|e| {
                        ProviderError::InvalidParams(format!("invalid transaction object: {}", e))
                    })?;
                let hash = self.signer.send_transaction(&transaction).await?;
                Ok(Value::String(hash))
            }

            "personal_sign" => {
                let message = decode_hex_message(param_at(&request, 0)?)?;
                let signature = self.signer.sign_message(&message).await?;
                Ok(Value::String(signature))
            }

            "eth_signTypedData_v4" => {
                let mut typed_data = parse_typed_data(param_at(&request, 1)?)?;
                typed_data.strip_domain_type();
                let signature = self.signer.sign_typed_data(&typed_data).await?;
                Ok(Value::String(signature))
            }

            _ => self.proxy(&request).await,
        }
    }

    /// Forward a method call verbatim to the JSON-RPC endpoint.
    async fn proxy(&self, request: &RpcRequest) -> ProviderResult<Value> {
        let params = request.params.clone().unwrap_or_else(|| json!([]));
        let body = JsonRpcRequest::new(&request.method, &params);

        tracing::debug!(method = %request.method, url = %self.rpc_url, "proxying JSON-RPC call");
        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?;
        let parsed: JsonRpcResponse = response.json().await?;

        if let Some(error) = parsed.error {
            return Err(ProviderError::Rpc {
                method: request.method.clone(),
                message: error.message,
            });
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

/// Get the positional parameter at `index`, or fail with a params error.
fn param_at(request: &RpcRequest, index: usize) -> ProviderResult<&Value> {
    request
        .params
        .as_ref()
        .and_then(Value::as_array)
        .and_then(|params| params.get(index))
        .ok_or_else(|| {
            ProviderError::InvalidParams(format!(
                "{} requires a params array with at least {} element(s)",
                request.method,
                index + 1
            ))
        })
}

/// Decode a `personal_sign` message param: a hex string of raw bytes, with
/// or without the `0x` prefix. The input is bytes, not UTF-8 text.
fn decode_hex_message(value: &Value) -> ProviderResult<Vec<u8>> {
    let text = value.as_str().ok_or_else(|| {
        ProviderError::InvalidParams("personal_sign message must be a hex string".to_string())
    })?;
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits)
        .map_err(|e| ProviderError::InvalidParams(format!("invalid hex message: {}", e)))
}

/// Parse the `eth_signTypedData_v4` payload param: either a JSON string or
/// an already-structured object.
fn parse_typed_data(value: &Value) -> ProviderResult<TypedData> {
    let result = match value {
        Value::String(text) => serde_json::from_str(text),
        other => serde_json::from_value(other.clone()),
    };
    result.map_err(|e| ProviderError::InvalidParams(format!("invalid typed data payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custody::{CustodyError, CustodyResult};

    /// Signer stub for dispatch tests; signing methods always fail.
    #[derive(Debug)]
    struct NoSigner;

    impl WalletSigner for NoSigner {
        async fn send_transaction(&self, _tx: &TransactionRequest) -> CustodyResult<String> {
            Err(CustodyError::ServerError("no signer".to_string()))
        }

        async fn sign_message(&self, _message: &[u8]) -> CustodyResult<String> {
            Err(CustodyError::ServerError("no signer".to_string()))
        }

        async fn sign_typed_data(&self, _typed_data: &TypedData) -> CustodyResult<String> {
            Err(CustodyError::ServerError("no signer".to_string()))
        }
    }

    fn test_config(chain_id: u64) -> ProviderConfig {
        ProviderConfig {
            app_id: "app".to_string(),
            app_secret: "secret".to_string(),
            wallet_id: "wallet_1".to_string(),
            address: "0x3333333333333333333333333333333333333333".to_string(),
            authorization_private_key: "cHJpdg==".to_string(),
            rpc_url: "http://127.0.0.1:1/".to_string(),
            chain_id,
            custody_api_url: None,
        }
    }

    #[test]
    fn test_unsupported_chain_fails_at_construction() {
        let err = PrivyProvider::with_signer(NoSigner, &test_config(999)).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn test_eth_accounts_returns_configured_address() {
        let provider = PrivyProvider::with_signer(NoSigner, &test_config(1)).unwrap();
        let result = tokio_test::block_on(provider.request(RpcRequest::new("eth_accounts")));
        assert_eq!(
            result.unwrap(),
            json!(["0x3333333333333333333333333333333333333333"])
        );
    }

    #[test]
    fn test_eth_chain_id_hex_formatting() {
        let provider = PrivyProvider::with_signer(NoSigner, &test_config(11155111)).unwrap();
        let result = tokio_test::block_on(provider.request(RpcRequest::new("eth_chainId")));
        assert_eq!(result.unwrap(), json!("0xaa36a7"));

        let provider = PrivyProvider::with_signer(NoSigner, &test_config(1)).unwrap();
        let result = tokio_test::block_on(provider.request(RpcRequest::new("eth_chainId")));
        assert_eq!(result.unwrap(), json!("0x1"));
    }

    #[test]
    fn test_send_transaction_missing_params() {
        let provider = PrivyProvider::with_signer(NoSigner, &test_config(1)).unwrap();
        let result =
            tokio_test::block_on(provider.request(RpcRequest::new("eth_sendTransaction")));
        assert!(matches!(result, Err(ProviderError::InvalidParams(_))));
    }

    #[test]
    fn test_personal_sign_rejects_non_hex() {
        let provider = PrivyProvider::with_signer(NoSigner, &test_config(1)).unwrap();
        let result = tokio_test::block_on(provider.request(RpcRequest::with_params(
            "personal_sign",
            json!(["not hex", "0x3333333333333333333333333333333333333333"]),
        )));
        assert!(matches!(result, Err(ProviderError::InvalidParams(_))));
    }

    #[test]
    fn test_decode_hex_message_prefix_optional() {
        let with_prefix = decode_hex_message(&json!("0xdeadbeef")).unwrap();
        let without_prefix = decode_hex_message(&json!("deadbeef")).unwrap();
        assert_eq!(with_prefix, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(with_prefix, without_prefix);
    }

    #[test]
    fn test_parse_typed_data_from_string_or_object() {
        let object = json!({
            "domain": {"name": "App"},
            "types": {"Mail": []},
            "primaryType": "Mail",
            "message": {}
        });
        let from_object = parse_typed_data(&object).unwrap();
        let from_string = parse_typed_data(&json!(object.to_string())).unwrap();
        assert_eq!(from_object, from_string);
    }
}
