pub mod intent;
pub mod stablecoin;

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

pub use intent::{CallIntent, Denomination, TokenAmount};
pub use stablecoin::Stablecoin;

/// A signed SSA rating report as delivered by DataLink.
///
/// `full_report` is the 0x-prefixed hex blob that gets forwarded untouched to
/// the oracle contract, which verifies the signatures on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub feed_id: String,
    pub valid_from_timestamp: i64,
    pub observations_timestamp: i64,
    pub full_report: String,
}

impl Report {
    /// Start of the validity window, RFC 3339 formatted.
    pub fn valid_from(&self) -> String {
        format_unix_seconds(self.valid_from_timestamp)
    }

    /// Time of the observations backing the report, RFC 3339 formatted.
    pub fn observed_at(&self) -> String {
        format_unix_seconds(self.observations_timestamp)
    }

    pub fn has_payload(&self) -> bool {
        !self.full_report.trim().is_empty()
    }
}

/// A token whose rating gets refreshed, with the DataLink feed it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    pub name: String,
    pub address: String,
    pub feed_id: String,
}

impl TokenDescriptor {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        feed_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            feed_id: feed_id.into(),
        }
    }
}

/// Formats a unix timestamp (seconds) as RFC 3339, falling back to the raw
/// value when it is out of chrono's range.
pub fn format_unix_seconds(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0).map_or_else(
        || format!("invalid timestamp {seconds}"),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
