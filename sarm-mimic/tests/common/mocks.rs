use httpmock::{Mock, prelude::*};
use serde_json::json;

// Well known development key and its address.
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const NONCE: &str = "nonce-1234";
pub const SESSION_TOKEN: &str = "session-token";

pub fn mock_nonce(mimic: &MockServer) -> Mock<'_> {
    mimic.mock(|when, then| {
        when.method(POST)
            .path("/users/nonce")
            .json_body(json!({ "address": DEV_ADDRESS }));
        then.status(200).json_body(json!({ "nonce": NONCE }));
    })
}

pub fn mock_authenticate(mimic: &MockServer) -> Mock<'_> {
    mimic.mock(|when, then| {
        when.method(POST)
            .path("/users/authenticate")
            .json_body_partial(json!({ "address": DEV_ADDRESS }).to_string());
        then.status(200).json_body(json!({ "token": SESSION_TOKEN }));
    })
}

pub fn mock_api_key<'a>(mimic: &'a MockServer, api_key: &str) -> Mock<'a> {
    let body = json!({ "apiKey": api_key });
    mimic.mock(|when, then| {
        when.method(GET)
            .path("/users/api-key")
            .header("x-auth-token", SESSION_TOKEN);
        then.status(200).json_body(body);
    })
}
