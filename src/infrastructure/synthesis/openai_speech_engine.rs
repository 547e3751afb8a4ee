use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{
    EngineDescriptor, SynthesisEngine, SynthesisError, SynthesisRequest, voice_slug,
};
use crate::domain::{AudioArtifact, AudioFormat};
use crate::presentation::config::OpenAiSpeechSettings;

use super::http_audio::{audio_from_response, require_key};

pub const OPENAI_ENGINE_ID: &str = "openai";

pub struct OpenAiSpeechEngine {
    client: Client,
    descriptor: EngineDescriptor,
    api_key: Option<String>,
    base_url: String,
    model: String,
    response_format: AudioFormat,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
    speed: f32,
}

impl OpenAiSpeechEngine {
    pub fn new(settings: &OpenAiSpeechSettings) -> Self {
        let response_format = match AudioFormat::from_extension(&settings.response_format) {
            Some(format @ (AudioFormat::Wav
            | AudioFormat::Mp3
            | AudioFormat::Opus
            | AudioFormat::Flac
            | AudioFormat::Aac)) => format,
            _ => {
                tracing::warn!(
                    response_format = %settings.response_format,
                    "Unsupported OpenAI speech format, using wav"
                );
                AudioFormat::Wav
            }
        };

        Self {
            client: Client::new(),
            descriptor: EngineDescriptor {
                id: OPENAI_ENGINE_ID.to_string(),
                output_format: response_format,
                local: false,
                default_voice: voice_slug(&settings.voice),
                voices: settings.voices.iter().map(|v| voice_slug(v)).collect(),
            },
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            response_format,
        }
    }
}

#[async_trait]
impl SynthesisEngine for OpenAiSpeechEngine {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioArtifact, SynthesisError> {
        let api_key = require_key(self.api_key.as_deref(), OPENAI_ENGINE_ID)?;
        let voice = request
            .voice
            .as_deref()
            .map(voice_slug)
            .unwrap_or_else(|| self.descriptor.default_voice.clone());

        let body = SpeechRequest {
            model: &self.model,
            input: &request.text,
            voice: &voice,
            response_format: self.response_format.extension(),
            speed: request.speed.clamp(0.25, 4.0),
        };

        tracing::debug!(model = %self.model, voice = %voice, "Requesting OpenAI speech");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        audio_from_response(response, self.response_format).await
    }
}
