use std::time::Duration;

use crate::application::ports::{BackendError, LlmClient};

use super::lazy_capability::LazyCapability;
use super::stage_outcome::StageOutcome;

pub const DEFAULT_FALLBACK_REPLY: &str = "Processing your request, please stand by.";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful voice assistant. Always answer in {language}. \
Keep the answer concise: at most two short sentences that sound natural when read aloud.";

pub struct ReplyGenerator {
    client: LazyCapability<dyn LlmClient>,
    system_prompt: String,
    timeout: Duration,
    fallback_reply: String,
}

impl ReplyGenerator {
    /// `{language}` in the template is replaced with the target language.
    pub fn new(
        client: LazyCapability<dyn LlmClient>,
        prompt_template: &str,
        language: &str,
        timeout: Duration,
        fallback_reply: impl Into<String>,
    ) -> Self {
        let template = if prompt_template.trim().is_empty() {
            DEFAULT_SYSTEM_PROMPT
        } else {
            prompt_template
        };
        let fallback_reply = fallback_reply.into();
        let fallback_reply = if fallback_reply.trim().is_empty() {
            DEFAULT_FALLBACK_REPLY.to_string()
        } else {
            fallback_reply
        };

        Self {
            client,
            system_prompt: template.replace("{language}", language),
            timeout,
            fallback_reply,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn fallback_reply(&self) -> &str {
        &self.fallback_reply
    }

    pub fn client(&self) -> &LazyCapability<dyn LlmClient> {
        &self.client
    }

    /// The returned text is never empty.
    pub async fn generate(&self, transcript: &str) -> StageOutcome<String> {
        let client = match self.client.get().await {
            Ok(client) => client,
            Err(cause) => return self.degraded(cause),
        };

        let call = client.complete(&self.system_prompt, transcript);
        match tokio::time::timeout(self.timeout, call).await {
            Err(_) => self.degraded(BackendError::Timeout(self.timeout)),
            Ok(Err(e)) => self.degraded(e.into()),
            Ok(Ok(reply)) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    self.degraded(BackendError::Rejected("empty completion".to_string()))
                } else {
                    StageOutcome::Real(reply.to_string())
                }
            }
        }
    }

    fn degraded(&self, cause: BackendError) -> StageOutcome<String> {
        tracing::warn!(cause = %cause, kind = cause.kind(), "Reply generation fell back to canned reply");
        StageOutcome::degraded(self.fallback_reply.clone(), cause)
    }
}
