//! Wallet login against the Mimic API.
//!
//! The account proves ownership of its address by signing a server issued
//! nonce (EIP-191). The returned session token can then be used directly or
//! exchanged for a long lived API key.

use std::time::Duration;

use alloy_primitives::{Address, Signature, hex};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    MimicError,
    constants::{AUTH_MESSAGE_PREFIX, AUTH_TOKEN_HEADER, DEFAULT_TIMEOUT},
    http::send_json,
};

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("could not sign authentication nonce: {0}")]
    Signing(#[from] alloy_signer::Error),
}

#[derive(Serialize)]
struct NonceRequest {
    address: String,
}

#[derive(Deserialize)]
struct NonceResponse {
    nonce: String,
}

#[derive(Serialize)]
struct AuthenticateRequest {
    address: String,
    signature: String,
}

#[derive(Deserialize)]
struct AuthenticateResponse {
    token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiKeyResponse {
    api_key: String,
}

/// Parses a hex private key, with or without `0x`.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, AuthError> {
    private_key
        .trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| AuthError::InvalidPrivateKey(e.to_string()))
}

pub fn auth_message(nonce: &str) -> String {
    format!("{AUTH_MESSAGE_PREFIX}{nonce}")
}

/// Signs the authentication message for `nonce` with the EIP-191 prefix.
pub fn sign_nonce(signer: &PrivateKeySigner, nonce: &str) -> Result<Signature, AuthError> {
    Ok(signer.sign_message_sync(auth_message(nonce).as_bytes())?)
}

pub struct LoginFlow {
    http_client: reqwest::Client,
    base_url: String,
}

impl LoginFlow {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MimicError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MimicError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::from_http(http_client, base_url))
    }

    pub(crate) fn from_http(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn request_nonce(&self, address: Address) -> Result<String, MimicError> {
        let endpoint = format!("{}/users/nonce", self.base_url);
        let request = self.http_client.post(&endpoint).json(&NonceRequest {
            address: address.to_string(),
        });
        let NonceResponse { nonce } = send_json(&endpoint, request).await?;
        Ok(nonce)
    }

    pub async fn authenticate(
        &self,
        address: Address,
        signature: &Signature,
    ) -> Result<String, MimicError> {
        let endpoint = format!("{}/users/authenticate", self.base_url);
        let request = self.http_client.post(&endpoint).json(&AuthenticateRequest {
            address: address.to_string(),
            signature: hex::encode_prefixed(signature.as_bytes()),
        });
        let AuthenticateResponse { token } = send_json(&endpoint, request).await?;
        Ok(token)
    }

    pub async fn fetch_api_key(&self, token: &str) -> Result<String, MimicError> {
        let endpoint = format!("{}/users/api-key", self.base_url);
        let request = self
            .http_client
            .get(&endpoint)
            .header(AUTH_TOKEN_HEADER, token);
        let ApiKeyResponse { api_key } = send_json(&endpoint, request).await?;
        Ok(api_key)
    }

    /// Runs nonce, signature and authentication, returning a session token.
    pub async fn login(&self, signer: &PrivateKeySigner) -> Result<String, MimicError> {
        let address = signer.address();
        info!(%address, "requesting authentication nonce");
        let nonce = self.request_nonce(address).await?;

        info!("signing nonce");
        let signature = sign_nonce(signer, &nonce)?;

        info!("authenticating");
        let token = self.authenticate(address, &signature).await?;
        info!("authenticated as {address}");
        Ok(token)
    }

    pub async fn retrieve_api_key(&self, signer: &PrivateKeySigner) -> Result<String, MimicError> {
        let token = self.login(signer).await?;
        info!("retrieving API key");
        self.fetch_api_key(&token).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // Well known development key.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[rstest]
    fn test_signature_recovers_to_signer() {
        let signer = parse_signer(DEV_KEY).unwrap();
        assert_eq!(signer.address().to_string(), DEV_ADDRESS);

        let signature = sign_nonce(&signer, "abc123").unwrap();
        let recovered = signature
            .recover_address_from_msg(auth_message("abc123"))
            .unwrap();

        assert_eq!(recovered, signer.address());
    }

    #[rstest]
    fn test_signing_is_deterministic() {
        let signer = parse_signer(DEV_KEY.trim_start_matches("0x")).unwrap();
        let first = sign_nonce(&signer, "n-1").unwrap();
        let second = sign_nonce(&signer, "n-1").unwrap();
        assert_eq!(first, second);
        assert_ne!(first, sign_nonce(&signer, "n-2").unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("0x1234")]
    #[case("not a key")]
    fn test_invalid_private_key(#[case] key: &str) {
        assert!(matches!(parse_signer(key), Err(AuthError::InvalidPrivateKey(_))));
    }

    #[rstest]
    fn test_auth_message() {
        assert_eq!(
            auth_message("42"),
            "Mimic Protocol authentication nonce: 42"
        );
    }
}
