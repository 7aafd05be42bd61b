use crate::constants::DEFAULT_DATALINK_API_URL;

/// Required fields to query the DataLink bulk reports API.
#[derive(Debug, Clone)]
pub struct DataLinkConfig {
    pub api_url: String,
    pub user: String,
    pub secret: String,
}

impl DataLinkConfig {
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_DATALINK_API_URL.to_string(),
            user: user.into(),
            secret: secret.into(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub(crate) fn has_credentials(&self) -> bool {
        !self.user.is_empty() && !self.secret.is_empty()
    }
}
