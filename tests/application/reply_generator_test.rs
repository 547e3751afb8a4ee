use std::sync::Arc;
use std::time::Duration;

use voiceturn::application::ports::{BackendError, LlmClient};
use voiceturn::application::services::{
    DEFAULT_FALLBACK_REPLY, DEFAULT_SYSTEM_PROMPT, LazyCapability, ReplyGenerator, StageOutcome,
};

use crate::helpers::mocks::MockLlmClient;

fn generator_with(client: MockLlmClient, timeout: Duration) -> ReplyGenerator {
    let client: Arc<dyn LlmClient> = Arc::new(client);
    ReplyGenerator::new(
        LazyCapability::ready("llm", client),
        DEFAULT_SYSTEM_PROMPT,
        "German",
        timeout,
        DEFAULT_FALLBACK_REPLY,
    )
}

#[tokio::test]
async fn given_template_with_language_placeholder_when_constructing_then_language_is_filled_in() {
    let generator = generator_with(MockLlmClient::returning("ok"), Duration::from_secs(1));

    assert!(generator.system_prompt().contains("Always answer in German."));
    assert!(!generator.system_prompt().contains("{language}"));
}

#[tokio::test]
async fn given_backend_answers_when_generating_then_real_reply() {
    let generator = generator_with(
        MockLlmClient::returning("You said: {input}"),
        Duration::from_secs(1),
    );

    let outcome = generator.generate("hello").await;

    assert_eq!(outcome, StageOutcome::Real("You said: hello".to_string()));
}

#[tokio::test]
async fn given_backend_fails_when_generating_then_fallback_reply() {
    let generator = generator_with(MockLlmClient::failing(), Duration::from_secs(1));

    let outcome = generator.generate("hello").await;

    assert_eq!(outcome.value(), DEFAULT_FALLBACK_REPLY);
    assert!(matches!(outcome.cause(), Some(BackendError::Rejected(_))));
}

#[tokio::test]
async fn given_backend_slower_than_timeout_when_generating_then_fallback_reply() {
    let generator = generator_with(
        MockLlmClient::slow("too late", Duration::from_secs(5)),
        Duration::from_millis(50),
    );

    let outcome = generator.generate("hello").await;

    assert_eq!(outcome.value(), DEFAULT_FALLBACK_REPLY);
    assert!(matches!(outcome.cause(), Some(BackendError::Timeout(_))));
}

#[tokio::test]
async fn given_backend_returns_blank_text_when_generating_then_reply_is_never_empty() {
    let generator = generator_with(MockLlmClient::returning("  \n "), Duration::from_secs(1));

    let outcome = generator.generate("hello").await;

    assert!(outcome.is_degraded());
    assert!(!outcome.value().is_empty());
}

#[tokio::test]
async fn given_unavailable_client_when_generating_then_fallback_reply() {
    let generator = ReplyGenerator::new(
        LazyCapability::disabled("llm", "no api key"),
        DEFAULT_SYSTEM_PROMPT,
        "English",
        Duration::from_secs(1),
        "One moment please.",
    );

    let outcome = generator.generate("hello").await;

    assert_eq!(outcome.value(), "One moment please.");
    assert!(matches!(outcome.cause(), Some(BackendError::Unavailable(_))));
}
