use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::types::{Report, Stablecoin, TokenDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum InputsError {
    #[error("task inputs are missing `{0}`")]
    MissingKey(String),
    #[error("malformed task inputs: {0}")]
    Json(#[from] serde_json::Error),
}

/// The input document injected into the task at execution time.
///
/// Token addresses and feed ids are flat keys (`eurcAddress`, `feedIdEurc`,
/// ...) next to the shared settings and the pre-fetched reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInputs {
    pub chain_id: u64,
    pub ssa_oracle_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sarm_hook_address: Option<String>,
    pub datalink_api_url: String,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(flatten)]
    pub tokens: BTreeMap<String, String>,
}

impl TaskInputs {
    pub fn new(chain_id: u64, ssa_oracle_address: impl Into<String>, datalink_api_url: impl Into<String>) -> Self {
        Self {
            chain_id,
            ssa_oracle_address: ssa_oracle_address.into(),
            sarm_hook_address: None,
            datalink_api_url: datalink_api_url.into(),
            reports: Vec::new(),
            tokens: BTreeMap::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, InputsError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn insert_token(&mut self, coin: Stablecoin, address: &str, feed_id: &str) {
        self.tokens
            .insert(coin.address_input_key(), address.to_string());
        self.tokens
            .insert(coin.feed_id_input_key(), feed_id.to_string());
    }

    /// Rebuilds the token table in update order.
    pub fn token_descriptors(&self) -> Result<Vec<TokenDescriptor>, InputsError> {
        Stablecoin::iter()
            .map(|coin| {
                let address = self.token_value(&coin.address_input_key())?;
                let feed_id = self.token_value(&coin.feed_id_input_key())?;
                Ok(TokenDescriptor::new(coin.to_string(), address, feed_id))
            })
            .collect()
    }

    fn token_value(&self, key: &str) -> Result<&str, InputsError> {
        self.tokens
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| InputsError::MissingKey(key.to_string()))
    }
}
