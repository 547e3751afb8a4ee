use std::sync::Arc;

use crate::application::services::EngineRegistry;
use crate::presentation::config::SynthesisSettings;

use super::azure_speech_engine::AzureSpeechEngine;
use super::elevenlabs_engine::ElevenLabsEngine;
use super::espeak_engine::EspeakEngine;
use super::openai_speech_engine::OpenAiSpeechEngine;

pub struct SynthesisEngineFactory;

impl SynthesisEngineFactory {
    /// Registers every enabled engine. Engines without credentials are still
    /// registered; their requests fail over to the fallback tone.
    pub fn registry(settings: &SynthesisSettings) -> EngineRegistry {
        let mut registry = EngineRegistry::new(&settings.default_engine);

        if settings.openai.enabled {
            registry.register(Arc::new(OpenAiSpeechEngine::new(&settings.openai)));
        }
        if settings.elevenlabs.enabled {
            registry.register(Arc::new(ElevenLabsEngine::new(&settings.elevenlabs)));
        }
        if settings.azure.enabled {
            registry.register(Arc::new(AzureSpeechEngine::new(&settings.azure)));
        }
        if settings.espeak.enabled {
            registry.register(Arc::new(EspeakEngine::new(
                &settings.espeak,
                settings.timeout(),
            )));
        }

        for (alias, target) in &settings.aliases {
            registry.alias(alias, target);
        }

        tracing::info!(
            engines = registry.len(),
            default_engine = registry.default_engine(),
            "Synthesis engines registered"
        );

        registry
    }
}
