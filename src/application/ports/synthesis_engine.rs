use async_trait::async_trait;

use crate::domain::{AudioArtifact, AudioFormat};

use super::backend_error::BackendError;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: Option<String>,
    pub language: String,
    pub style: Option<String>,
    pub speed: f32,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            language: language.into(),
            style: None,
            speed: 1.0,
        }
    }

    pub fn with_voice(mut self, voice: Option<String>) -> Self {
        self.voice = voice.filter(|v| !v.trim().is_empty());
        self
    }

    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Lowercases a speaker name and joins its words with underscores, so
/// "Uncle Fu" and "uncle_fu" select the same voice.
pub fn voice_slug(voice: &str) -> String {
    voice.trim().to_lowercase().replace(' ', "_")
}

/// Static description of a registered synthesis backend.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineDescriptor {
    pub id: String,
    pub output_format: AudioFormat,
    pub local: bool,
    pub default_voice: String,
    pub voices: Vec<String>,
}

#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    fn descriptor(&self) -> &EngineDescriptor;

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioArtifact, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    #[error("api request failed: {0}")]
    RequestFailed(String),
    #[error("api rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("engine returned no audio")]
    EmptyAudio,
    #[error("engine failed: {0}")]
    EngineFailed(String),
}

impl From<SynthesisError> for BackendError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::MissingCredentials(msg) | SynthesisError::Unavailable(msg) => {
                BackendError::Unavailable(msg)
            }
            other => BackendError::Rejected(other.to_string()),
        }
    }
}
