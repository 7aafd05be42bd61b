use std::time::Duration;

use crate::{DataLinkClient, DataLinkConfig, constants::DEFAULT_TIMEOUT};

#[derive(thiserror::Error, Debug)]
pub enum BuilderError {
    #[error("DATALINK_USER and DATALINK_SECRET must be set")]
    MissingCredentials,
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

/// Builder of the DataLink client.
/// Requests time out after 30 seconds unless configured otherwise.
#[derive(Debug)]
pub struct DataLinkClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for DataLinkClientBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl DataLinkClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self, config: DataLinkConfig) -> Result<DataLinkClient, BuilderError> {
        if !config.has_credentials() {
            return Err(BuilderError::MissingCredentials);
        }

        let mut http_client = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            http_client = http_client.user_agent(user_agent);
        }
        let http_client = http_client.build()?;

        Ok(DataLinkClient {
            http_client,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "secret")]
    #[case("user", "")]
    fn test_missing_credentials(#[case] user: &str, #[case] secret: &str) {
        let result = DataLinkClientBuilder::new().build(DataLinkConfig::new(user, secret));
        assert!(matches!(result, Err(BuilderError::MissingCredentials)));
    }
}
