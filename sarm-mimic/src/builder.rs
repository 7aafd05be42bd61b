use std::time::Duration;

use alloy_signer_local::PrivateKeySigner;

use crate::{
    LoginFlow, MimicAuth, MimicClient, MimicError,
    constants::{DEFAULT_MIMIC_API_URL, DEFAULT_TIMEOUT},
};

/// Builder of the Mimic client.
/// Either an API key is given, or a signer logs in and the session token is used.
#[derive(Debug)]
pub struct MimicClientBuilder {
    api_url: String,
    timeout: Duration,
}

impl Default for MimicClientBuilder {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_MIMIC_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MimicClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(self, api_key: impl Into<String>) -> Result<MimicClient, MimicError> {
        self.build(MimicAuth::ApiKey(api_key.into()))
    }

    /// Logs in with `signer` and authenticates requests with the session token.
    pub async fn with_signer(self, signer: &PrivateKeySigner) -> Result<MimicClient, MimicError> {
        let http_client = self.http_client()?;
        let token = LoginFlow::from_http(http_client.clone(), self.api_url.clone())
            .login(signer)
            .await?;

        Ok(MimicClient {
            http_client,
            base_url: self.api_url,
            auth: MimicAuth::Token(token),
            signer: Some(signer.clone()),
        })
    }

    pub fn build(self, auth: MimicAuth) -> Result<MimicClient, MimicError> {
        Ok(MimicClient {
            http_client: self.http_client()?,
            base_url: self.api_url,
            auth,
            signer: None,
        })
    }

    fn http_client(&self) -> Result<reqwest::Client, MimicError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}
