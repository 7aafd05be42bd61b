use alloy_primitives::hex;
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use reqwest::{
    RequestBuilder,
    multipart::{Form, Part},
};
use tracing::info;

use crate::{
    AuthError, MimicError,
    constants::{API_KEY_HEADER, AUTH_TOKEN_HEADER},
    http::send_json,
    types::{ConfigCreated, Execution, ExecutionRequest, SignedTaskConfig, TaskConfig, TaskCreated},
};

/// Credentials attached to every platform request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimicAuth {
    ApiKey(String),
    Token(String),
}

impl MimicAuth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::ApiKey(key) => request.header(API_KEY_HEADER, key),
            Self::Token(token) => request.header(AUTH_TOKEN_HEADER, token),
        }
    }
}

pub struct MimicClient {
    pub(crate) http_client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: MimicAuth,
    /// Present when logged in with a wallet, configurations are then signed.
    pub(crate) signer: Option<PrivateKeySigner>,
}

/// EIP-191 signature of the JSON serialization of `config`.
pub fn sign_config(signer: &PrivateKeySigner, config: &TaskConfig) -> Result<String, MimicError> {
    let payload = serde_json::to_vec(config)?;
    let signature = signer
        .sign_message_sync(&payload)
        .map_err(AuthError::from)?;
    Ok(hex::encode_prefixed(signature.as_bytes()))
}

impl MimicClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &MimicAuth {
        &self.auth
    }

    /// Uploads the task manifest and compiled module, returning the task CID.
    pub async fn create_task(
        &self,
        manifest: Vec<u8>,
        wasm: Vec<u8>,
    ) -> Result<TaskCreated, MimicError> {
        let endpoint = format!("{}/tasks", self.base_url);
        info!(
            manifest_bytes = manifest.len(),
            wasm_bytes = wasm.len(),
            "uploading task"
        );

        let form = Form::new()
            .part(
                "manifestFile",
                Part::bytes(manifest)
                    .file_name("manifest.yaml")
                    .mime_str("application/x-yaml")?,
            )
            .part(
                "wasmFile",
                Part::bytes(wasm)
                    .file_name("task.wasm")
                    .mime_str("application/wasm")?,
            );

        let request = self.auth.apply(self.http_client.post(&endpoint)).multipart(form);
        let created: TaskCreated = send_json(&endpoint, request).await?;
        info!(cid = %created.cid, "task uploaded");
        Ok(created)
    }

    /// Registers a configuration of an uploaded task, returning its signature.
    ///
    /// With wallet auth the configuration is signed by the wallet, with an
    /// API key it is sent unsigned.
    pub async fn create_config(&self, config: &TaskConfig) -> Result<ConfigCreated, MimicError> {
        let endpoint = format!("{}/configs", self.base_url);
        let signature = self
            .signer
            .as_ref()
            .map(|signer| sign_config(signer, config))
            .transpose()?;
        info!(task_cid = %config.task_cid, signed = signature.is_some(), "creating task config");

        let body = SignedTaskConfig { config, signature };
        let request = self.auth.apply(self.http_client.post(&endpoint)).json(&body);
        let created: ConfigCreated = send_json(&endpoint, request).await?;
        info!(sig = %created.sig, "task config created");
        Ok(created)
    }

    /// Requests a manual execution of the configuration `config_sig`.
    pub async fn trigger_execution(&self, config_sig: &str) -> Result<Execution, MimicError> {
        let endpoint = format!("{}/executions", self.base_url);
        info!(config_sig, "triggering manual execution");

        let request = self
            .auth
            .apply(self.http_client.post(&endpoint))
            .json(&ExecutionRequest::manual(config_sig));
        let execution: Execution = send_json(&endpoint, request).await?;
        info!(hash = %execution.hash, status = %execution.status, "execution requested");
        Ok(execution)
    }
}
