//! HTTP client for the custody wallet API.
//!
//! The [`CustodyClient`] talks to the custody service's REST surface:
//! provisioning wallets and executing wallet RPC calls (signing operations)
//! against a custodied key. Every request authenticates with the app
//! credentials; signing requests additionally carry an authorization
//! signature produced with the locally held authorization key.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use p256::ecdsa::{signature::Signer, Signature, SigningKey};
use p256::pkcs8::DecodePrivateKey;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::custody::error::{CustodyError, CustodyResult, ErrorResponse};
use crate::custody::types::{
    CreateWalletRequest, ProvisionedWallet, WalletOwner, WalletRpcRequest, WalletRpcResponse,
};
use crate::network::DEFAULT_CUSTODY_API_URL;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the app id on every custody request.
const APP_ID_HEADER: &str = "privy-app-id";

/// Header carrying the authorization signature on signing requests.
const AUTHORIZATION_SIGNATURE_HEADER: &str = "privy-authorization-signature";

// ============================================================================
// Authorization key
// ============================================================================

/// The private half of the authorization keypair.
///
/// Signs the canonical payload of signing requests to prove the caller's
/// right to use the custodied wallet. This is a P-256 key, distinct from the
/// blockchain signing key the custody service holds.
#[derive(Clone)]
pub struct AuthorizationKey {
    key: SigningKey,
}

impl std::fmt::Debug for AuthorizationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationKey").finish_non_exhaustive()
    }
}

impl AuthorizationKey {
    /// Parse a base64-encoded PKCS#8 DER private key.
    pub fn from_base64(encoded: &str) -> CustodyResult<Self> {
        let der = BASE64.decode(encoded.trim()).map_err(|e| {
            CustodyError::AuthorizationKey(format!("invalid base64 key material: {}", e))
        })?;
        let key = SigningKey::from_pkcs8_der(&der).map_err(|e| {
            CustodyError::AuthorizationKey(format!("invalid PKCS#8 private key: {}", e))
        })?;
        Ok(Self { key })
    }

    /// Wrap an already-parsed signing key.
    pub fn from_signing_key(key: SigningKey) -> Self {
        Self { key }
    }

    /// Sign a canonical request payload, returning base64(DER signature).
    pub fn sign(&self, payload: &[u8]) -> String {
        let signature: Signature = self.key.sign(payload);
        BASE64.encode(signature.to_der().as_bytes())
    }
}

/// Canonical payload signed by the authorization key.
///
/// Field order matters: the service reconstructs the same payload to verify
/// the signature, so this struct serializes its fields in the documented
/// order rather than sorting keys.
#[derive(Serialize)]
struct SignaturePayload<'a> {
    version: u8,
    method: &'static str,
    url: &'a str,
    body: &'a Value,
    headers: SignatureHeaders<'a>,
}

#[derive(Serialize)]
struct SignatureHeaders<'a> {
    #[serde(rename = "privy-app-id")]
    app_id: &'a str,
}

// ============================================================================
// Client
// ============================================================================

/// Builder for configuring [`CustodyClient`].
#[derive(Debug, Clone)]
pub struct CustodyClientBuilder {
    base_url: String,
    timeout: Duration,
    app_id: String,
    app_secret: String,
}

impl CustodyClientBuilder {
    /// Create a new builder with the given app credentials.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_CUSTODY_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Override the custody API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> CustodyResult<CustodyClient> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let app_id_value = reqwest::header::HeaderValue::from_str(&self.app_id)
            .map_err(|e| CustodyError::Deserialize(format!("invalid app id header: {}", e)))?;
        headers.insert(APP_ID_HEADER, app_id_value);

        let http_client = Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;

        Ok(CustodyClient {
            http_client,
            base_url: self.base_url,
            app_id: self.app_id,
            app_secret: self.app_secret,
        })
    }
}

/// Custody service REST client.
#[derive(Debug, Clone)]
pub struct CustodyClient {
    http_client: Client,
    base_url: String,
    app_id: String,
    app_secret: String,
}

impl CustodyClient {
    /// Create a client against the default custody API URL.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> CustodyResult<Self> {
        CustodyClientBuilder::new(app_id, app_secret).build()
    }

    /// Create a builder for custom configuration.
    pub fn builder(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> CustodyClientBuilder {
        CustodyClientBuilder::new(app_id, app_secret)
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// Provision a new custodied wallet owned by the given authorization
    /// public key.
    pub async fn create_wallet(&self, owner_public_key: &str) -> CustodyResult<ProvisionedWallet> {
        let url = format!("{}/v1/wallets", self.base_url);
        let request = CreateWalletRequest {
            chain_type: "ethereum",
            owner: WalletOwner {
                public_key: owner_public_key.to_string(),
            },
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| CustodyError::Deserialize(format!("request serialization: {}", e)))?;

        tracing::debug!(url = %url, "creating custodied wallet");
        self.post_json(&url, &body, None).await
    }

    /// Execute a wallet RPC call (a signing operation) against a custodied
    /// wallet.
    ///
    /// When `auth_key` is provided, the request carries an authorization
    /// signature over the canonical payload; the service rejects signing
    /// requests for owned wallets without one.
    pub async fn wallet_rpc<P: Serialize>(
        &self,
        wallet_id: &str,
        auth_key: Option<&AuthorizationKey>,
        request: &WalletRpcRequest<P>,
    ) -> CustodyResult<WalletRpcResponse> {
        let url = format!(
            "{}/v1/wallets/{}/rpc",
            self.base_url,
            urlencoding::encode(wallet_id)
        );
        let body = serde_json::to_value(request)
            .map_err(|e| CustodyError::Deserialize(format!("request serialization: {}", e)))?;

        let signature = auth_key.map(|key| {
            let payload = SignaturePayload {
                version: 1,
                method: "POST",
                url: &url,
                body: &body,
                headers: SignatureHeaders {
                    app_id: &self.app_id,
                },
            };
            // Serialization of a struct with only string/object fields cannot fail.
            let canonical = serde_json::to_vec(&payload).unwrap_or_default();
            key.sign(&canonical)
        });

        tracing::debug!(url = %url, method = request.method, "executing wallet RPC");
        self.post_json(&url, &body, signature).await
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Execute an authenticated POST and decode the JSON response.
    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &Value,
        authorization_signature: Option<String>,
    ) -> CustodyResult<T> {
        let mut request = self
            .http_client
            .post(url)
            .basic_auth(&self.app_id, Some(&self.app_secret))
            .json(body);
        if let Some(signature) = authorization_signature {
            request = request.header(AUTHORIZATION_SIGNATURE_HEADER, signature);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                CustodyError::Deserialize(format!("Failed to deserialize response: {}", e))
            });
        }

        Err(Self::parse_error_response(status, response).await)
    }

    /// Parse a non-success response into a [`CustodyError`].
    async fn parse_error_response(status: StatusCode, response: reqwest::Response) -> CustodyError {
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorResponse>(&text)
                .map(|parsed| parsed.get_message())
                .unwrap_or(text),
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                format!("HTTP {} (body unreadable)", status)
            }
        };

        match status {
            StatusCode::UNAUTHORIZED => CustodyError::Unauthorized(message),
            StatusCode::BAD_REQUEST => CustodyError::BadRequest(message),
            StatusCode::FORBIDDEN => CustodyError::Forbidden(message),
            StatusCode::NOT_FOUND => CustodyError::NotFound(message),
            _ if status.is_server_error() => CustodyError::ServerError(message),
            _ => CustodyError::UnexpectedStatus(status.as_u16(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> AuthorizationKey {
        AuthorizationKey::from_signing_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    #[test]
    fn test_authorization_key_rejects_garbage() {
        assert!(matches!(
            AuthorizationKey::from_base64("not base64!!!"),
            Err(CustodyError::AuthorizationKey(_))
        ));
        // Valid base64, invalid DER
        assert!(matches!(
            AuthorizationKey::from_base64("aGVsbG8="),
            Err(CustodyError::AuthorizationKey(_))
        ));
    }

    #[test]
    fn test_authorization_signature_is_base64_der() {
        let key = test_key();
        let signature = key.sign(b"payload");
        let decoded = BASE64.decode(signature).unwrap();
        // DER-encoded ECDSA signatures start with a SEQUENCE tag.
        assert_eq!(decoded[0], 0x30);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = CustodyClient::builder("app", "secret")
            .base_url("https://custody.example.com/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://custody.example.com");
    }

    #[test]
    fn test_signature_payload_field_order() {
        let body = serde_json::json!({"method": "personal_sign"});
        let payload = SignaturePayload {
            version: 1,
            method: "POST",
            url: "https://custody.example.com/v1/wallets/w1/rpc",
            body: &body,
            headers: SignatureHeaders { app_id: "app" },
        };
        let text = serde_json::to_string(&payload).unwrap();
        let version_pos = text.find("\"version\"").unwrap();
        let body_pos = text.find("\"body\"").unwrap();
        let headers_pos = text.find("\"privy-app-id\"").unwrap();
        assert!(version_pos < body_pos && body_pos < headers_pos);
    }
}
