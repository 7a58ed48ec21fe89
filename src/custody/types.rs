//! Request/response types for the custody wallet API.

use serde::{Deserialize, Serialize};

use crate::custody::error::{CustodyError, CustodyResult};
use crate::rpc::{TransactionRequest, TypedData};

// ============================================================================
// Wallet provisioning
// ============================================================================

/// Request body for `POST /v1/wallets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWalletRequest {
    /// Always `"ethereum"` for this adapter
    pub chain_type: &'static str,
    /// Owner of the new wallet: the local authorization keypair
    pub owner: WalletOwner,
}

/// Owner declaration inside [`CreateWalletRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct WalletOwner {
    /// Base64-encoded public half of the authorization keypair
    pub public_key: String,
}

/// A wallet provisioned by the custody service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProvisionedWallet {
    /// Opaque wallet identifier issued by the custody service
    pub id: String,
    /// Blockchain address of the custodied signing key (hex)
    pub address: String,
}

// ============================================================================
// Wallet RPC
// ============================================================================

/// Request body for `POST /v1/wallets/{id}/rpc`.
#[derive(Debug, Clone, Serialize)]
pub struct WalletRpcRequest<P: Serialize> {
    /// Wallet RPC method name
    pub method: &'static str,
    /// CAIP-2 network scope (`eip155:<chain_id>`); required for transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caip2: Option<String>,
    /// Always `"ethereum"`
    pub chain_type: &'static str,
    /// Method-specific parameters
    pub params: P,
}

/// Params for the `eth_sendTransaction` wallet RPC method.
#[derive(Debug, Clone, Serialize)]
pub struct SendTransactionParams {
    /// The transaction to sign and broadcast
    pub transaction: TransactionRequest,
}

/// Params for the `personal_sign` wallet RPC method.
#[derive(Debug, Clone, Serialize)]
pub struct SignMessageParams {
    /// Hex-encoded message bytes (no `0x` prefix)
    pub message: String,
    /// Always `"hex"`: the message field carries raw bytes, not UTF-8 text
    pub encoding: &'static str,
}

/// Params for the `eth_signTypedData_v4` wallet RPC method.
#[derive(Debug, Clone, Serialize)]
pub struct SignTypedDataParams {
    /// The normalized typed-data payload
    pub typed_data: TypedData,
}

/// Response body for `POST /v1/wallets/{id}/rpc`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletRpcResponse {
    /// Echo of the method that was executed
    #[serde(default)]
    pub method: Option<String>,
    /// Method-specific result payload
    pub data: WalletRpcData,
}

/// Result payload inside [`WalletRpcResponse`]; fields are method-specific.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletRpcData {
    /// Transaction hash (send-transaction responses)
    #[serde(default)]
    pub hash: Option<String>,
    /// Signature (message/typed-data signing responses)
    #[serde(default)]
    pub signature: Option<String>,
    /// Signature encoding, when the service reports one
    #[serde(default)]
    pub encoding: Option<String>,
}

impl WalletRpcResponse {
    /// Extract the transaction hash or fail with a deserialization error.
    pub fn into_hash(self) -> CustodyResult<String> {
        self.data.hash.ok_or_else(|| {
            CustodyError::Deserialize("wallet RPC response is missing `data.hash`".to_string())
        })
    }

    /// Extract the signature or fail with a deserialization error.
    pub fn into_signature(self) -> CustodyResult<String> {
        self.data.signature.ok_or_else(|| {
            CustodyError::Deserialize(
                "wallet RPC response is missing `data.signature`".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_wallet_request_serialize() {
        let request = CreateWalletRequest {
            chain_type: "ethereum",
            owner: WalletOwner {
                public_key: "BASE64KEY".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"chain_type": "ethereum", "owner": {"public_key": "BASE64KEY"}})
        );
    }

    #[test]
    fn test_provisioned_wallet_deserialize() {
        let json = r#"{
            "id": "wallet_abc123",
            "address": "0x1111111111111111111111111111111111111111",
            "chain_type": "ethereum",
            "created_at": 1700000000
        }"#;
        let wallet: ProvisionedWallet = serde_json::from_str(json).unwrap();
        assert_eq!(wallet.id, "wallet_abc123");
        assert!(wallet.address.starts_with("0x"));
    }

    #[test]
    fn test_wallet_rpc_request_skips_missing_caip2() {
        let request = WalletRpcRequest {
            method: "personal_sign",
            caip2: None,
            chain_type: "ethereum",
            params: SignMessageParams {
                message: "deadbeef".to_string(),
                encoding: "hex",
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("caip2").is_none());
        assert_eq!(value["params"]["encoding"], "hex");
    }

    #[test]
    fn test_wallet_rpc_response_hash() {
        let response: WalletRpcResponse = serde_json::from_value(json!({
            "method": "eth_sendTransaction",
            "data": {"hash": "0xabc"}
        }))
        .unwrap();
        assert_eq!(response.into_hash().unwrap(), "0xabc");
    }

    #[test]
    fn test_wallet_rpc_response_missing_signature() {
        let response: WalletRpcResponse = serde_json::from_value(json!({
            "data": {"hash": "0xabc"}
        }))
        .unwrap();
        assert!(matches!(
            response.into_signature(),
            Err(CustodyError::Deserialize(_))
        ));
    }
}
