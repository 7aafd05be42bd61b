use reqwest::StatusCode;

use crate::auth::AuthError;

#[derive(thiserror::Error, Debug)]
pub enum MimicError {
    #[error("Mimic API error on {endpoint}: {status}\n{body}")]
    HttpRequest {
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("could not serialize request: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
