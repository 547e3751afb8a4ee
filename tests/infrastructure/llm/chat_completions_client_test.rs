use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use voiceturn::application::ports::{LlmClient, LlmClientError};
use voiceturn::infrastructure::llm::{LlmClientFactory, create_chat_completions_client};
use voiceturn::presentation::config::LlmSettings;

use crate::helpers::start_mock_server;

#[derive(Default, Clone)]
struct Seen {
    authorization: Option<String>,
    api_key: Option<String>,
    query: Option<String>,
    body: Value,
}

type Shared = Arc<Mutex<Seen>>;

async fn chat_server(path: &str, status: u16, reply: Value) -> (String, Shared, oneshot::Sender<()>) {
    let seen = Shared::default();
    let app = Router::new()
        .route(
            path,
            post(
                move |State(seen): State<Shared>,
                      RawQuery(query): RawQuery,
                      headers: HeaderMap,
                      Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        let header = |name: &str| {
                            headers
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(String::from)
                        };
                        *seen.lock().unwrap() = Seen {
                            authorization: header("authorization"),
                            api_key: header("api-key"),
                            query,
                            body,
                        };
                        (StatusCode::from_u16(status).unwrap(), Json(reply)).into_response()
                    }
                },
            ),
        )
        .with_state(Arc::clone(&seen));
    let (base_url, shutdown) = start_mock_server(app).await;
    (base_url, seen, shutdown)
}

fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn openai_settings(base_url: &str, api_key: Option<&str>) -> LlmSettings {
    LlmSettings {
        base_url: Some(format!("{}/v1", base_url)),
        api_key: api_key.map(String::from),
        ..LlmSettings::default()
    }
}

#[tokio::test]
async fn given_openai_provider_when_completing_then_sends_bearer_model_and_messages() {
    let (base_url, seen, shutdown) =
        chat_server("/v1/chat/completions", 200, completion("It is noon.")).await;
    let client = create_chat_completions_client(&openai_settings(&base_url, Some("sk-1"))).unwrap();

    let reply = client.complete("Be brief.", "What time is it?").await.unwrap();

    assert_eq!(reply, "It is noon.");
    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer sk-1"));
    assert_eq!(seen.body["model"], "gpt-4o-mini");
    assert_eq!(seen.body["max_tokens"], 256);
    assert_eq!(seen.body["messages"][0]["role"], "system");
    assert_eq!(seen.body["messages"][0]["content"], "Be brief.");
    assert_eq!(seen.body["messages"][1]["content"], "What time is it?");
    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_custom_base_url_without_key_when_completing_then_no_authorization_header() {
    let (base_url, seen, shutdown) = chat_server("/v1/chat/completions", 200, completion("hi")).await;
    let client = create_chat_completions_client(&openai_settings(&base_url, None)).unwrap();

    client.complete("sys", "user").await.unwrap();

    assert!(seen.lock().unwrap().authorization.is_none());
    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_azure_provider_when_completing_then_uses_api_key_header_and_version_without_model() {
    let (base_url, seen, shutdown) = chat_server(
        "/openai/deployments/gpt-4o/chat/completions",
        200,
        completion("hej"),
    )
    .await;
    let settings = LlmSettings {
        provider: "azure".to_string(),
        api_key: Some("az-key".to_string()),
        azure_endpoint: Some(format!("{}/", base_url)),
        chat_model: "gpt-4o".to_string(),
        ..LlmSettings::default()
    };
    let client = create_chat_completions_client(&settings).unwrap();

    assert_eq!(client.complete("sys", "user").await.unwrap(), "hej");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.api_key.as_deref(), Some("az-key"));
    assert!(seen.authorization.is_none());
    assert_eq!(seen.query.as_deref(), Some("api-version=2024-06-01"));
    assert!(seen.body.get("model").is_none());
    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_429_when_completing_then_rate_limited() {
    let (base_url, _seen, shutdown) =
        chat_server("/v1/chat/completions", 429, json!({ "error": "slow down" })).await;
    let client = create_chat_completions_client(&openai_settings(&base_url, Some("k"))).unwrap();

    let result = client.complete("sys", "user").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_completing_then_rejected_with_status() {
    let (base_url, _seen, shutdown) =
        chat_server("/v1/chat/completions", 500, json!({ "error": "boom" })).await;
    let client = create_chat_completions_client(&openai_settings(&base_url, Some("k"))).unwrap();

    let result = client.complete("sys", "user").await;

    assert!(matches!(result, Err(LlmClientError::Rejected { status: 500, .. })));
    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_no_choices_when_completing_then_invalid_response() {
    let (base_url, _seen, shutdown) =
        chat_server("/v1/chat/completions", 200, json!({ "choices": [] })).await;
    let client = create_chat_completions_client(&openai_settings(&base_url, Some("k"))).unwrap();

    let result = client.complete("sys", "user").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
    shutdown.send(()).ok();
}

#[test]
fn given_openai_without_key_or_base_url_when_creating_then_error() {
    assert!(create_chat_completions_client(&LlmSettings::default()).is_err());
}

#[test]
fn given_azure_without_endpoint_or_unknown_provider_when_creating_then_error() {
    let azure = LlmSettings {
        provider: "azure".to_string(),
        api_key: Some("k".to_string()),
        ..LlmSettings::default()
    };
    let unknown = LlmSettings {
        provider: "carrier-pigeon".to_string(),
        ..LlmSettings::default()
    };

    assert!(create_chat_completions_client(&azure).is_err());
    assert!(create_chat_completions_client(&unknown).is_err());
}

#[test]
fn given_ollama_provider_when_creating_then_no_key_is_needed() {
    let settings = LlmSettings {
        provider: "ollama".to_string(),
        ..LlmSettings::default()
    };

    assert!(create_chat_completions_client(&settings).is_ok());
}

#[tokio::test]
async fn given_unconfigured_llm_when_lazily_resolving_then_unavailable_and_not_retried() {
    let settings = LlmSettings {
        retry_cooldown_secs: 0,
        ..LlmSettings::default()
    };
    let capability = LlmClientFactory::lazy(&settings);

    assert!(capability.get().await.is_err());
    assert!(capability.get().await.is_err());
    assert_eq!(capability.construction_attempts(), 1);
}
