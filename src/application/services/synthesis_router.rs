use std::collections::HashMap;
use std::time::Duration;

use crate::application::ports::{BackendError, EngineDescriptor, SynthesisRequest};
use crate::domain::AudioArtifact;

use super::engine_registry::EngineRegistry;
use super::fallback_tone::FallbackTone;

/// Request parameters shared by every engine.
#[derive(Debug, Clone)]
pub struct SynthesisDefaults {
    pub language: String,
    pub style: Option<String>,
    pub speed: f32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Identifier the caller selected (an alias stays an alias), or the
    /// default engine id when the request was unknown. Kept on failure.
    pub engine: String,
    pub audio: AudioArtifact,
    pub cause: Option<BackendError>,
}

impl SynthesisOutcome {
    pub fn is_fallback(&self) -> bool {
        self.cause.is_some()
    }
}

pub struct SynthesisRouter {
    registry: EngineRegistry,
    fallback_tone: FallbackTone,
    defaults: SynthesisDefaults,
}

impl SynthesisRouter {
    pub fn new(
        registry: EngineRegistry,
        fallback_tone: FallbackTone,
        defaults: SynthesisDefaults,
    ) -> Self {
        Self {
            registry,
            fallback_tone,
            defaults,
        }
    }

    pub fn default_engine(&self) -> &str {
        self.registry.default_engine()
    }

    pub fn engines(&self) -> Vec<EngineDescriptor> {
        self.registry.descriptors()
    }

    pub fn aliases(&self) -> HashMap<String, String> {
        self.registry.aliases().clone()
    }

    pub fn resolve_id(&self, requested: Option<&str>) -> String {
        self.registry.resolve(requested).id
    }

    /// Always yields audio: the engine's bytes on success, the fallback tone otherwise.
    pub async fn synthesize(
        &self,
        text: &str,
        requested_engine: Option<&str>,
        voice: Option<&str>,
    ) -> SynthesisOutcome {
        let resolved = self.registry.resolve(requested_engine);
        if !resolved.matched {
            tracing::debug!(
                requested = requested_engine.unwrap_or(""),
                resolved = %resolved.id,
                "Unknown synthesis engine, using default"
            );
        }

        let Some(engine) = resolved.engine else {
            return self.fallback(
                resolved.requested_id,
                BackendError::Unavailable(format!("engine '{}' is not registered", resolved.id)),
            );
        };

        let request = SynthesisRequest::new(text, self.defaults.language.clone())
            .with_voice(voice.map(str::to_string))
            .with_style(self.defaults.style.clone())
            .with_speed(self.defaults.speed);

        match tokio::time::timeout(self.defaults.timeout, engine.synthesize(&request)).await {
            Err(_) => self.fallback(
                resolved.requested_id,
                BackendError::Timeout(self.defaults.timeout),
            ),
            Ok(Err(e)) => self.fallback(resolved.requested_id, e.into()),
            Ok(Ok(audio)) if audio.is_empty() => self.fallback(
                resolved.requested_id,
                BackendError::Rejected("engine returned no audio".to_string()),
            ),
            Ok(Ok(audio)) => {
                tracing::info!(
                    engine = %resolved.id,
                    bytes = audio.len(),
                    content_type = audio.content_type(),
                    characters = text.chars().count(),
                    "Reply synthesized"
                );
                SynthesisOutcome {
                    engine: resolved.requested_id,
                    audio,
                    cause: None,
                }
            }
        }
    }

    fn fallback(&self, engine: String, cause: BackendError) -> SynthesisOutcome {
        tracing::warn!(
            engine = %engine,
            cause = %cause,
            kind = cause.kind(),
            "Synthesis failed, serving fallback tone"
        );
        SynthesisOutcome {
            engine,
            audio: self.fallback_tone.artifact(),
            cause: Some(cause),
        }
    }
}
