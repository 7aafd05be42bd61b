use httpmock::{Mock, prelude::*};
use serde_json::json;

pub const BULK_PATH: &str = "/api/v1/reports/bulk";

/// `user:secret`, base64 encoded.
pub const BASIC_AUTH: &str = "Basic dXNlcjpzZWNyZXQ=";

pub fn mock_bulk_reports<'a>(
    datalink: &'a MockServer,
    feed_ids: &[&str],
    body: serde_json::Value,
) -> Mock<'a> {
    let request = json!({ "feedIds": feed_ids });
    datalink.mock(|when, then| {
        when.method(POST)
            .path(BULK_PATH)
            .header("Authorization", BASIC_AUTH)
            .json_body(request);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

pub fn report_data(feed_id: &str, full_report: &str) -> serde_json::Value {
    json!({
        "feedId": feed_id,
        "validFromTimestamp": 1732000000,
        "observationsTimestamp": 1732000060,
        "fullReport": full_report
    })
}
