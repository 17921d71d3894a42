//! Workflow behaviour when the remote vault misbehaves.

use serde_json::json;
use tokenization_workflow::{run_demo, WorkflowError};
use vault_core::{HttpAliasesClient, VaultConfig, VaultError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(value: &str, alias: &str, format: &str) -> serde_json::Value {
    json!({
        "value": value,
        "classifiers": [],
        "aliases": [{"alias": alias, "format": format}],
        "created_at": "2019-05-15T12:30:45Z"
    })
}

async fn mount_redact(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/aliases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                record("4111111111111111", "tok_sandbox_card", "PFPT"),
                record("123", "tok_sandbox_csc", "UUID"),
                record("078-05-1120", "tok_sandbox_ssn", "UUID")
            ]
        })))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> HttpAliasesClient {
    HttpAliasesClient::new(VaultConfig::new("user", "pass").with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn reveal_succeeding_after_delete_is_reported() {
    let server = MockServer::start().await;
    mount_redact(&server).await;

    Mock::given(method("PUT"))
        .and(path("/aliases/tok_sandbox_card"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/aliases/tok_sandbox_card"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/aliases/tok_sandbox_card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [record("4111111111111111", "tok_sandbox_card", "PFPT")]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = run_demo(&client_for(&server)).await.unwrap_err();

    match err {
        WorkflowError::DeletedAliasStillResolvable(alias) => assert_eq!(alias, "tok_sandbox_card"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_update_stops_before_reveal() {
    let server = MockServer::start().await;
    mount_redact(&server).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"status": 403, "title": "Forbidden", "detail": "classifier not permitted"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run_demo(&client_for(&server)).await.unwrap_err();

    assert!(matches!(err, WorkflowError::Vault(VaultError::Forbidden(_))));
}
