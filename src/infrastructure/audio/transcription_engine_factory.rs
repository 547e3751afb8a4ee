use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::application::services::LazyCapability;
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.provider {
            TranscriptionProviderSetting::OpenAi => {
                let api_key = non_blank(settings.api_key.as_deref());
                // Self-hosted compatible servers usually run without a key.
                if api_key.is_none() && settings.base_url.is_none() {
                    return Err(TranscriptionError::InitializationFailed(
                        "API key required for OpenAI Whisper".to_string(),
                    ));
                }
                let engine = OpenAiWhisperEngine::new(
                    api_key.unwrap_or_default().to_string(),
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Azure => {
                let endpoint = required(settings.azure_endpoint.as_deref(), "azure_endpoint")?;
                let deployment =
                    required(settings.azure_deployment.as_deref(), "azure_deployment")?;
                let api_key = required(settings.api_key.as_deref(), "api_key")?;
                let engine = AzureWhisperEngine::new(
                    endpoint,
                    deployment,
                    api_key,
                    &settings.azure_api_version,
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Disabled => Err(TranscriptionError::InitializationFailed(
                "transcription is disabled".to_string(),
            )),
        }
    }

    /// Defers construction to the first transcription request.
    pub fn lazy(settings: &TranscriptionSettings) -> LazyCapability<dyn TranscriptionEngine> {
        if settings.provider == TranscriptionProviderSetting::Disabled {
            return LazyCapability::disabled("transcription", "transcription is disabled");
        }

        let cooldown = settings.retry_cooldown();
        let settings = settings.clone();
        LazyCapability::new(
            "transcription",
            Arc::new(move || Self::create(&settings).map_err(|e| e.to_string())),
            cooldown,
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, TranscriptionError> {
    non_blank(value).ok_or_else(|| {
        TranscriptionError::InitializationFailed(format!("transcription.{} is required", key))
    })
}
