use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::LazyCapability;
use crate::presentation::config::LlmSettings;

use super::chat_completions_client::create_chat_completions_client;

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, String> {
        let client = create_chat_completions_client(settings).map_err(|e| e.to_string())?;
        Ok(Arc::new(client))
    }

    /// Defers construction to the first reply request.
    pub fn lazy(settings: &LlmSettings) -> LazyCapability<dyn LlmClient> {
        let cooldown = settings.retry_cooldown();
        let settings = settings.clone();
        LazyCapability::new("llm", Arc::new(move || Self::create(&settings)), cooldown)
    }
}
