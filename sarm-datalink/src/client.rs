use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use sarm_common::Report;

use crate::DataLinkConfig;

#[derive(thiserror::Error, Debug)]
pub enum DataLinkError {
    #[error("at least one feed id must be configured")]
    NoFeedIds,
    #[error("DataLink API error: {status}\n{body}")]
    HttpRequest { status: StatusCode, body: String },
    #[error("invalid response from DataLink API: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkReportsRequest<'a> {
    feed_ids: Vec<&'a str>,
}

#[derive(Deserialize)]
struct BulkReportsResponse {
    reports: Vec<Report>,
}

pub struct DataLinkClient {
    pub(crate) http_client: reqwest::Client,
    pub(crate) config: DataLinkConfig,
}

impl DataLinkClient {
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Fetches the latest signed report of every feed in one bulk request.
    ///
    /// Empty feed ids are ignored. The response must contain a `reports`
    /// array of well formed reports, anything else is rejected.
    pub async fn fetch_reports(&self, feed_ids: &[String]) -> Result<Vec<Report>, DataLinkError> {
        let feed_ids: Vec<&str> = feed_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .collect();
        if feed_ids.is_empty() {
            return Err(DataLinkError::NoFeedIds);
        }

        info!(api_url = %self.config.api_url, "fetching reports for feeds {}", feed_ids.join(", "));

        let response = self
            .http_client
            .post(&self.config.api_url)
            .basic_auth(&self.config.user, Some(&self.config.secret))
            .json(&BulkReportsRequest { feed_ids })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataLinkError::HttpRequest { status, body });
        }

        let body = response.text().await?;
        let BulkReportsResponse { reports } = serde_json::from_str(&body)
            .map_err(|e| DataLinkError::MalformedResponse(e.to_string()))?;

        info!("fetched {} reports", reports.len());
        for report in &reports {
            info!(
                valid_from = %report.valid_from(),
                observations = %report.observed_at(),
                "feed {}", report.feed_id
            );
        }

        Ok(reports)
    }
}
