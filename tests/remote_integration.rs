//! Integration tests for the HTTP invoker.
//!
//! A wiremock server stands in for the Reeve server's CLI API.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reeve_cli::cli::commands::{ask_with, AskMode};
use reeve_cli::core::config::{ClientConfig, ConfigOverrides};
use reeve_cli::remote::{CommandInvoker, HttpInvoker, RemoteError};

fn invoker_for(server: &MockServer, overrides: ConfigOverrides) -> HttpInvoker {
    let config = ClientConfig::default().with_overrides(&ConfigOverrides {
        url: Some(server.uri()),
        secret: Some("s3cret".into()),
        ..Default::default()
    });
    HttpInvoker::from_config(&config.with_overrides(&overrides)).unwrap()
}

fn catalog() -> serde_json::Value {
    json!({
        "deploy": {
            "trigger": "Trigger a deployment",
            "status": "Show deployment status"
        },
        "cache": {
            "clear": "Clear the build cache"
        }
    })
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn list_commands_sends_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cli"))
        .and(header("Authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    let catalog = invoker.list_commands().await.unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog["deploy"]["trigger"], "Trigger a deployment");
}

#[tokio::test]
async fn custom_header_without_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cli"))
        .and(header("X-Api-Key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(
        &server,
        ConfigOverrides {
            auth_header: Some("X-Api-Key".into()),
            auth_prefix: Some(String::new()),
            ..Default::default()
        },
    );
    assert!(invoker.list_commands().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_rejects_non_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cli"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    let err = invoker.list_commands().await.unwrap_err();
    assert!(matches!(err, RemoteError::UnexpectedContentType(_)), "{err:?}");
}

#[tokio::test]
async fn list_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cli"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid secret"))
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    let err = invoker.list_commands().await.unwrap_err();
    assert_eq!(
        err,
        RemoteError::Status {
            status: 401,
            body: "invalid secret".into()
        }
    );
    assert_eq!(err.to_string(), "status 401 - invalid secret");
}

#[tokio::test]
async fn ask_renders_sorted_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    let text = ask_with(&invoker, &AskMode::ListAll).await.unwrap();

    assert_eq!(
        text,
        "  cache\n\
         \x20       clear   Clear the build cache\n\
         \x20 deploy\n\
         \x20       status    Show deployment status\n\
         \x20       trigger   Trigger a deployment\n"
    );
}

// =============================================================================
// Execution
// =============================================================================

#[tokio::test]
async fn execute_posts_args_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cli"))
        .and(query_param("target", "deploy"))
        .and(query_param("method", "trigger"))
        .and(header("Authorization", "Bearer s3cret"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!(["web", "--force"])))
        .respond_with(ResponseTemplate::new(200).set_body_string("deployment queued\n"))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    let output = invoker
        .execute("deploy", "trigger", &["web".to_string(), "--force".to_string()])
        .await
        .unwrap();
    assert_eq!(output, "deployment queued\n");
}

#[tokio::test]
async fn execute_without_args_sends_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cli"))
        .and(body_json(json!([])))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    assert_eq!(invoker.execute("cache", "clear", &[]).await.unwrap(), "ok");
}

#[tokio::test]
async fn execute_surfaces_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cli"))
        .respond_with(ResponseTemplate::new(500).set_body_string("plugin crashed"))
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    let err = invoker.execute("deploy", "trigger", &[]).await.unwrap_err();
    assert_eq!(err.to_string(), "status 500 - plugin crashed");
}

#[tokio::test]
async fn execute_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let invoker = invoker_for(&server, ConfigOverrides::default());
    assert_eq!(
        invoker.execute("deploy", "", &[]).await.unwrap_err(),
        RemoteError::MissingMethod
    );
}

#[tokio::test]
async fn trailing_slash_in_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(
        &server,
        ConfigOverrides {
            url: Some(format!("{}/", server.uri())),
            ..Default::default()
        },
    );
    invoker.list_commands().await.unwrap();
}
