use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::application::services::{
    FallbackTone, FormatNormalizer, ReplyGenerator, SynthesisDefaults, SynthesisRouter,
    TranscriptionAdapter, TurnOrchestrator,
};
use crate::infrastructure::audio::{AudioConverterFactory, TranscriptionEngineFactory};
use crate::infrastructure::llm::LlmClientFactory;
use crate::infrastructure::storage::ArtifactStoreFactory;
use crate::infrastructure::synthesis::SynthesisEngineFactory;
use crate::presentation::config::Settings;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to render fallback tone: {0}")]
    FallbackTone(#[from] hound::Error),
    #[error("failed to open artifact store: {0}")]
    ArtifactStore(#[from] ArtifactStoreError),
}

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TurnOrchestrator>,
    pub artifact_store: Arc<dyn ArtifactStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wires every adapter from configuration. Backends are not contacted here;
    /// transcription and LLM clients are built on first use.
    pub fn from_settings(settings: Settings) -> Result<Self, StartupError> {
        let artifact_store = ArtifactStoreFactory::create(&settings.artifacts)?;
        Self::with_store(settings, artifact_store)
    }

    pub fn with_store(
        settings: Settings,
        artifact_store: Arc<dyn ArtifactStore>,
    ) -> Result<Self, StartupError> {
        let scratch_root = settings
            .pipeline
            .scratch_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        let normalizer = FormatNormalizer::new(
            AudioConverterFactory::create(&settings.normalizer),
            scratch_root,
        );

        let transcriber = TranscriptionAdapter::new(
            TranscriptionEngineFactory::lazy(&settings.transcription),
            settings.transcription.timeout(),
            settings.transcription.placeholder.clone(),
        );

        let replier = ReplyGenerator::new(
            LlmClientFactory::lazy(&settings.llm),
            &settings.llm.system_prompt,
            &settings.pipeline.language,
            settings.llm.timeout(),
            settings.llm.fallback_reply.clone(),
        );

        let router = SynthesisRouter::new(
            SynthesisEngineFactory::registry(&settings.synthesis),
            FallbackTone::new()?,
            SynthesisDefaults {
                language: settings.pipeline.language.clone(),
                style: settings.synthesis.style.clone(),
                speed: settings.synthesis.speed,
                timeout: settings.synthesis.timeout(),
            },
        );

        let orchestrator = TurnOrchestrator::new(
            normalizer,
            transcriber,
            replier,
            router,
            Arc::clone(&artifact_store),
            settings.pipeline.audio_route.clone(),
        );

        tracing::info!(
            converters = ?orchestrator.normalizer().converter_names(),
            default_engine = orchestrator.router().default_engine(),
            language = %settings.pipeline.language,
            "Turn pipeline assembled"
        );

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            artifact_store,
            settings: Arc::new(settings),
        })
    }
}
