use alloy_primitives::{hex, keccak256};
use serde::{Deserialize, Serialize};

use sarm_common::inputs::TaskInputs;

use crate::constants::{
    EXECUTION_FEE_LIMIT, MIN_VALIDATIONS, RISK_CHECK_EVENT_SIGNATURE, TASK_DESCRIPTION,
    TASK_VERSION, TRIGGER_DELTA,
};

/// Topic 0 of the `RiskCheck` event.
///
/// Log topics are full 32-byte hashes. The truncated selector `0x988b2889`
/// never matches a log and must not be used here.
pub fn risk_check_topic() -> String {
    hex::encode_prefixed(keccak256(RISK_CHECK_EVENT_SIGNATURE.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Trigger {
    #[serde(rename_all = "camelCase")]
    Event {
        chain_id: u64,
        contract: String,
        topics: Vec<Vec<String>>,
        delta: String,
        end_date: u64,
    },
}

impl Trigger {
    /// Fires on every `RiskCheck` emitted by `hook_address`, with no end date.
    pub fn risk_check(chain_id: u64, hook_address: impl Into<String>) -> Self {
        Self::Event {
            chain_id,
            contract: hook_address.into(),
            topics: vec![vec![risk_check_topic()]],
            delta: TRIGGER_DELTA.to_string(),
            end_date: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    pub description: String,
    pub task_cid: String,
    pub version: String,
    pub trigger: Trigger,
    pub input: TaskInputs,
    pub execution_fee_limit: String,
    pub min_validations: u32,
}

impl TaskConfig {
    /// Configuration of the rating refresh task, triggered by the hook.
    pub fn rating_refresh(task_cid: impl Into<String>, input: TaskInputs, hook_address: &str) -> Self {
        Self {
            description: TASK_DESCRIPTION.to_string(),
            task_cid: task_cid.into(),
            version: TASK_VERSION.to_string(),
            trigger: Trigger::risk_check(input.chain_id, hook_address),
            input,
            execution_fee_limit: EXECUTION_FEE_LIMIT.to_string(),
            min_validations: MIN_VALIDATIONS,
        }
    }
}

/// Body of `POST /configs`.
#[derive(Debug, Serialize)]
pub(crate) struct SignedTaskConfig<'a> {
    #[serde(flatten)]
    pub(crate) config: &'a TaskConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskCreated {
    #[serde(rename = "CID")]
    pub cid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigCreated {
    pub sig: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Execution {
    pub hash: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExecutionRequest<'a> {
    pub config_sig: &'a str,
    pub trigger_type: &'static str,
    pub trigger_data: serde_json::Value,
    pub timestamp: String,
    pub inputs: Vec<serde_json::Value>,
    pub outputs: Vec<serde_json::Value>,
}

impl<'a> ExecutionRequest<'a> {
    pub(crate) fn manual(config_sig: &'a str) -> Self {
        Self {
            config_sig,
            trigger_type: "manual",
            trigger_data: serde_json::json!({}),
            timestamp: chrono::Utc::now().to_rfc3339(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}
