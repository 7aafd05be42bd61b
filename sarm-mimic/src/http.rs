use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::MimicError;

/// Sends `request` and decodes a JSON body, keeping status and body of
/// non-2xx responses for the error.
pub(crate) async fn send_json<T: DeserializeOwned>(
    endpoint: &str,
    request: RequestBuilder,
) -> Result<T, MimicError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(MimicError::HttpRequest {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| MimicError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}
