//! HTTP-level provider tests against a mockito server.
//!
//! Covers the error-taxonomy mapping of the Groq provider: success, auth
//! rejection, rate limiting (with and without Retry-After), server errors,
//! and unparseable bodies. No retries are expected anywhere: every test
//! mounts a mock with `expect(1)`.

use gca_rs::config::{NetworkConfig, ProviderConfig};
use gca_rs::error::GcaError;
use gca_rs::llm::CompletionProvider;
use gca_rs::llm::provider::groq::GroqProvider;

fn provider_for(server: &mockito::Server) -> GroqProvider {
    let config = ProviderConfig {
        api_key: Some("gsk_test_key".to_string()),
        endpoint: Some(server.url()),
        ..Default::default()
    };
    GroqProvider::new(&config, "groq", &NetworkConfig::default()).unwrap()
}

#[tokio::test]
async fn test_send_prompt_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":"feat: add login"}}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await.unwrap();

    assert_eq!(result, "feat: add login");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_commit_message_cleans_fences() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":"```\nfix: unwrap\n```"}}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let message = provider
        .generate_commit_message("+line", None)
        .await
        .unwrap();

    assert_eq!(message, "fix: unwrap");
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await;

    match result {
        Err(GcaError::Auth(msg)) => assert!(msg.contains("Invalid API Key")),
        other => panic!("Expected Auth error, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limited_with_retry_after() {
    let mut server = mockito::Server::new_async().await;
    // expect(1): the client must NOT retry on its own.
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_header("retry-after", "7")
        .with_body("slow down")
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await;

    match result {
        Err(GcaError::RateLimited {
            retry_after,
            message,
        }) => {
            assert_eq!(retry_after, Some(7));
            assert!(message.contains("slow down"));
        }
        other => panic!("Expected RateLimited, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_without_retry_after_header() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_body("busy")
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await;

    assert!(matches!(
        result,
        Err(GcaError::RateLimited {
            retry_after: None,
            ..
        })
    ));
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await;

    match result {
        Err(GcaError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_success_body_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("this is not json")
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await;

    match result {
        Err(GcaError::Api { message, .. }) => {
            assert!(message.contains("failed to parse"));
            assert!(message.contains("this is not json"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_returns_empty_string() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.send_prompt("system", "user").await.unwrap();

    // The message parser downstream turns this into EmptyResponse.
    assert_eq!(result, "");
}
