use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use sarm_common::inputs::TaskInputs;
use sarm_mimic::{MimicClient, MimicClientBuilder, MimicError, TaskConfig, types::risk_check_topic};

const API_KEY: &str = "mk_test_key";

fn client_for(mimic: &MockServer) -> MimicClient {
    MimicClientBuilder::new()
        .with_api_url(mimic.base_url())
        .with_api_key(API_KEY)
        .expect("Could not build MimicClient")
}

#[rstest]
#[tokio::test]
async fn test_create_task() {
    let mimic = MockServer::start();
    let mock = mimic.mock(|when, then| {
        when.method(POST)
            .path("/tasks")
            .header("x-api-key", API_KEY)
            .body_contains("manifestFile")
            .body_contains("wasmFile")
            .body_contains("version: 1.0.0");
        then.status(200).json_body(json!({ "CID": "bafybeigdyrzt" }));
    });

    let client = client_for(&mimic);
    let created = client
        .create_task(b"version: 1.0.0\n".to_vec(), vec![0x00, 0x61, 0x73, 0x6d])
        .await
        .unwrap();

    mock.assert();
    assert_eq!(created.cid, "bafybeigdyrzt");
}

#[rstest]
#[tokio::test]
async fn test_create_config() {
    let mimic = MockServer::start();
    let mut input = TaskInputs::new(84532, "0xoracle", "https://datalink.test/bulk");
    input.sarm_hook_address = Some("0xhook".to_string());
    let config = TaskConfig::rating_refresh("bafy-cid", input, "0xhook");

    let mock = mimic.mock(|when, then| {
        when.method(POST)
            .path("/configs")
            .header("x-api-key", API_KEY)
            .json_body_partial(
                json!({
                    "taskCid": "bafy-cid",
                    "minValidations": 1,
                    "trigger": { "contract": "0xhook", "topics": [[risk_check_topic()]] }
                })
                .to_string(),
            );
        then.status(201).json_body(json!({ "sig": "0xconfigsig" }));
    });

    let client = client_for(&mimic);
    let created = client.create_config(&config).await.unwrap();

    mock.assert();
    assert_eq!(created.sig, "0xconfigsig");
}

#[rstest]
#[tokio::test]
async fn test_trigger_execution() {
    let mimic = MockServer::start();
    let mock = mimic.mock(|when, then| {
        when.method(POST)
            .path("/executions")
            .header("x-api-key", API_KEY)
            .json_body_partial(
                json!({ "configSig": "0xconfigsig", "triggerType": "manual" }).to_string(),
            );
        then.status(200)
            .json_body(json!({ "hash": "0xexec", "status": "pending" }));
    });

    let client = client_for(&mimic);
    let execution = client.trigger_execution("0xconfigsig").await.unwrap();

    mock.assert();
    assert_eq!(execution.hash, "0xexec");
    assert_eq!(execution.status, "pending");
}

#[rstest]
#[case(400, "invalid config")]
#[case(401, "unauthorized")]
#[case(500, "")]
#[tokio::test]
async fn test_http_error_keeps_status_and_body(#[case] code: u16, #[case] message: &str) {
    let mimic = MockServer::start();
    mimic.mock(|when, then| {
        when.method(POST).path("/executions");
        then.status(code).body(message);
    });

    let client = client_for(&mimic);
    let err = client.trigger_execution("0xconfigsig").await.unwrap_err();

    match err {
        MimicError::HttpRequest { status, body, .. } => {
            assert_eq!(status.as_u16(), code);
            assert_eq!(body, message);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[tokio::test]
async fn test_malformed_task_response() {
    let mimic = MockServer::start();
    mimic.mock(|when, then| {
        when.method(POST).path("/tasks");
        then.status(200).json_body(json!({ "cid": "lowercase" }));
    });

    let client = client_for(&mimic);
    let err = client.create_task(Vec::new(), Vec::new()).await.unwrap_err();

    assert!(matches!(err, MimicError::MalformedResponse { .. }), "{err}");
}
