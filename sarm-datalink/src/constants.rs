use std::time::Duration;

/// Bulk reports endpoint of the DataLink testnet.
pub const DEFAULT_DATALINK_API_URL: &str =
    "https://api.testnet-dataengine.chain.link/api/v1/reports/bulk";

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
