//! Shared Ethereum JSON-RPC wire types.
//!
//! These types are used on both sides of the adapter: the provider parses
//! them out of incoming EIP-1193 requests, and the custody client serializes
//! them back out when delegating signing operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Provider request
// ============================================================================

/// A single EIP-1193 style request: `{ method, params? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// RPC method name (e.g. `eth_sendTransaction`)
    pub method: String,
    /// Positional parameters; `None` forwards as an empty array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RpcRequest {
    /// Create a request with no parameters.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: None,
        }
    }

    /// Create a request with positional parameters.
    pub fn with_params(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params: Some(params),
        }
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// An Ethereum quantity (`value`, `gas`, `nonce`).
///
/// Callers pass quantities in three interchangeable encodings: a JSON number,
/// a decimal string, or a `0x`-prefixed hex string. All three deserialize to
/// the exact integer; serialization always emits minimal `0x` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(pub u128);

impl Quantity {
    /// The raw integer value.
    pub fn as_u128(&self) -> u128 {
        self.0
    }
}

impl From<u64> for Quantity {
    fn from(v: u64) -> Self {
        Self(v as u128)
    }
}

impl From<u128> for Quantity {
    fn from(v: u128) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:x}", self.0))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuantityVisitor;

        impl serde::de::Visitor<'_> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a non-negative integer, decimal string, or 0x-hex string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Quantity, E> {
                Ok(Quantity(v as u128))
            }

            fn visit_u128<E: serde::de::Error>(self, v: u128) -> Result<Quantity, E> {
                Ok(Quantity(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Quantity, E> {
                u128::try_from(v)
                    .map(Quantity)
                    .map_err(|_| E::custom(format!("negative quantity: {}", v)))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Quantity, E> {
                let parsed = if let Some(hex_digits) =
                    v.strip_prefix("0x").or_else(|| v.strip_prefix("0X"))
                {
                    u128::from_str_radix(hex_digits, 16)
                } else {
                    v.parse::<u128>()
                };
                parsed
                    .map(Quantity)
                    .map_err(|_| E::custom(format!("invalid quantity string: {:?}", v)))
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}

// ============================================================================
// Transaction request
// ============================================================================

/// The transaction object passed as the first `eth_sendTransaction` param.
///
/// Every field is optional at this layer; the custody service rejects
/// combinations it cannot sign. Unknown incoming fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionRequest {
    /// Recipient address (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Sender address (hex); informational, the custody wallet always signs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Call data (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Value in wei
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    /// Gas limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<Quantity>,
    /// Transaction nonce; omitted means the transport assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Quantity>,
}

// ============================================================================
// Typed data (EIP-712)
// ============================================================================

/// An EIP-712 typed-data payload as passed to `eth_signTypedData_v4`.
///
/// The `primaryType` field is also accepted under the snake_case spelling
/// `primary_type`, which some tooling emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypedData {
    /// Domain separator fields
    pub domain: Value,
    /// Type definitions, keyed by type name
    pub types: serde_json::Map<String, Value>,
    /// Name of the top-level type being signed
    #[serde(rename = "primaryType", alias = "primary_type")]
    pub primary_type: String,
    /// The message to sign
    pub message: Value,
}

impl TypedData {
    /// Remove the `EIP712Domain` declaration from the type set.
    ///
    /// The domain type is implied by the `domain` object and is not part of
    /// the signed type set expected by the custody service.
    pub fn strip_domain_type(&mut self) {
        self.types.remove("EIP712Domain");
    }
}

// ============================================================================
// JSON-RPC envelope (proxy)
// ============================================================================

/// Outbound JSON-RPC 2.0 request body for proxied methods.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    /// Always `"2.0"`
    pub jsonrpc: &'static str,
    /// Request id; the proxy is single-shot so this is always 1
    pub id: u64,
    /// Method name, forwarded verbatim
    pub method: &'a str,
    /// Positional parameters, `[]` when the caller omitted them
    pub params: &'a Value,
}

impl<'a> JsonRpcRequest<'a> {
    /// Build the envelope for a forwarded method call.
    pub fn new(method: &'a str, params: &'a Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// Inbound JSON-RPC 2.0 response body.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    /// Result value when the call succeeded
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object when the call failed
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object (only the message is surfaced).
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_from_number() {
        let q: Quantity = serde_json::from_value(json!(1000)).unwrap();
        assert_eq!(q, Quantity(1000));
    }

    #[test]
    fn test_quantity_from_decimal_string() {
        let q: Quantity = serde_json::from_value(json!("1000000000000000000")).unwrap();
        assert_eq!(q.as_u128(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_quantity_from_hex_string() {
        let q: Quantity = serde_json::from_value(json!("0xde0b6b3a7640000")).unwrap();
        assert_eq!(q.as_u128(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_quantity_rejects_garbage() {
        assert!(serde_json::from_value::<Quantity>(json!("0xzz")).is_err());
        assert!(serde_json::from_value::<Quantity>(json!("ten")).is_err());
        assert!(serde_json::from_value::<Quantity>(json!(-1)).is_err());
    }

    #[test]
    fn test_quantity_serializes_as_hex() {
        assert_eq!(serde_json::to_value(Quantity(0)).unwrap(), json!("0x0"));
        assert_eq!(
            serde_json::to_value(Quantity(21000)).unwrap(),
            json!("0x5208")
        );
    }

    #[test]
    fn test_transaction_request_mixed_encodings() {
        let tx: TransactionRequest = serde_json::from_value(json!({
            "to": "0x1111111111111111111111111111111111111111",
            "value": "0xde0b6b3a7640000",
            "gas": 21000,
            "nonce": "7",
            "chainId": "0x1"
        }))
        .unwrap();
        assert_eq!(tx.value, Some(Quantity(1_000_000_000_000_000_000)));
        assert_eq!(tx.gas, Some(Quantity(21000)));
        assert_eq!(tx.nonce, Some(Quantity(7)));
        assert!(tx.data.is_none());
    }

    #[test]
    fn test_typed_data_primary_type_aliases() {
        let camel: TypedData = serde_json::from_value(json!({
            "domain": {"name": "App", "chainId": 1},
            "types": {"Mail": []},
            "primaryType": "Mail",
            "message": {}
        }))
        .unwrap();
        let snake: TypedData = serde_json::from_value(json!({
            "domain": {"name": "App", "chainId": 1},
            "types": {"Mail": []},
            "primary_type": "Mail",
            "message": {}
        }))
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.primary_type, "Mail");
    }

    #[test]
    fn test_typed_data_strip_domain_type() {
        let mut typed: TypedData = serde_json::from_value(json!({
            "domain": {"name": "App"},
            "types": {
                "EIP712Domain": [{"name": "name", "type": "string"}],
                "Mail": [{"name": "body", "type": "string"}]
            },
            "primaryType": "Mail",
            "message": {"body": "hi"}
        }))
        .unwrap();
        typed.strip_domain_type();
        assert!(!typed.types.contains_key("EIP712Domain"));
        assert!(typed.types.contains_key("Mail"));
    }

    #[test]
    fn test_json_rpc_request_shape() {
        let params = json!([1, 2]);
        let body = serde_json::to_value(JsonRpcRequest::new("eth_blockNumber", &params)).unwrap();
        assert_eq!(
            body,
            json!({"jsonrpc": "2.0", "id": 1, "method": "eth_blockNumber", "params": [1, 2]})
        );
    }
}
