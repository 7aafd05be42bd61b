use std::time::Duration;

pub const DEFAULT_MIMIC_API_URL: &str = "https://api.mimic.fi";

/// Header carrying a long lived API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying a session token obtained through the wallet login.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Prefix of the message signed during the wallet login.
pub const AUTH_MESSAGE_PREFIX: &str = "Mimic Protocol authentication nonce: ";

/// Event emitted by the SARM hook on every swap, used as the task trigger.
pub const RISK_CHECK_EVENT_SIGNATURE: &str = "RiskCheck(bytes32,uint8,uint8,uint8)";

pub const TASK_DESCRIPTION: &str =
    "SARM Protocol SSA Rating Refresh - On-demand rating updates triggered by swaps";
pub const TASK_VERSION: &str = "1.0.0";
/// 1 ETH in wei.
pub const EXECUTION_FEE_LIMIT: &str = "1000000000000000000";
pub const MIN_VALIDATIONS: u32 = 1;
pub const TRIGGER_DELTA: &str = "1h";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
