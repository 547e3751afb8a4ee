use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{EngineDescriptor, SynthesisEngine, SynthesisError, SynthesisRequest};
use crate::domain::{AudioArtifact, AudioFormat};
use crate::presentation::config::ElevenLabsSettings;

use super::http_audio::{audio_from_response, require_key};

pub const ELEVENLABS_ENGINE_ID: &str = "elevenlabs";
const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

pub struct ElevenLabsEngine {
    client: Client,
    descriptor: EngineDescriptor,
    api_key: Option<String>,
    base_url: String,
    model_id: String,
    output_format: String,
    language_code: Option<String>,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
}

#[derive(Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    voice_settings: VoiceSettings,
}

/// `mp3_44100_128` → mp3, `opus_48000_64` → opus. Headerless `pcm_*` and
/// `ulaw_*` streams have no container to serve and are not supported.
fn format_of(output_format: &str) -> Option<AudioFormat> {
    let codec = output_format.split('_').next().unwrap_or_default();
    match AudioFormat::from_extension(codec) {
        Some(format @ (AudioFormat::Mp3 | AudioFormat::Opus)) => Some(format),
        _ => None,
    }
}

impl ElevenLabsEngine {
    pub fn new(settings: &ElevenLabsSettings) -> Self {
        let requested = settings.output_format.trim();
        let (output_format, format) = match format_of(requested) {
            Some(format) => (requested.to_string(), format),
            None => {
                tracing::warn!(
                    output_format = %requested,
                    "Unsupported ElevenLabs output format, using {}",
                    DEFAULT_OUTPUT_FORMAT
                );
                (DEFAULT_OUTPUT_FORMAT.to_string(), AudioFormat::Mp3)
            }
        };

        Self {
            client: Client::new(),
            descriptor: EngineDescriptor {
                id: ELEVENLABS_ENGINE_ID.to_string(),
                output_format: format,
                local: false,
                default_voice: settings.voice_id.clone(),
                voices: vec![settings.voice_id.clone()],
            },
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model_id: settings.model_id.clone(),
            output_format,
            language_code: settings.language_code.clone(),
            voice_settings: VoiceSettings {
                stability: settings.stability,
                similarity_boost: settings.similarity_boost,
                style: settings.style,
            },
        }
    }
}

#[async_trait]
impl SynthesisEngine for ElevenLabsEngine {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioArtifact, SynthesisError> {
        let api_key = require_key(self.api_key.as_deref(), ELEVENLABS_ENGINE_ID)?;
        // Voice ids are opaque and case-sensitive.
        let voice = request
            .voice
            .as_deref()
            .map(str::trim)
            .unwrap_or(&self.descriptor.default_voice);

        let body = TextToSpeechRequest {
            text: &request.text,
            model_id: &self.model_id,
            language_code: self.language_code.as_deref(),
            voice_settings: self.voice_settings,
        };

        tracing::debug!(model = %self.model_id, voice = %voice, "Requesting ElevenLabs speech");

        let response = self
            .client
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, voice))
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        audio_from_response(response, self.descriptor.output_format).await
    }
}
