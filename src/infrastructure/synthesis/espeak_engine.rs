use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{EngineDescriptor, SynthesisEngine, SynthesisError, SynthesisRequest};
use crate::domain::{AudioArtifact, AudioFormat};
use crate::infrastructure::process::{CommandFailure, run_with_timeout};
use crate::presentation::config::EspeakSettings;

pub const ESPEAK_ENGINE_ID: &str = "espeak";

/// Offline synthesis through the `espeak-ng` binary.
pub struct EspeakEngine {
    descriptor: EngineDescriptor,
    binary: String,
    words_per_minute: u32,
    timeout: Duration,
}

impl EspeakEngine {
    pub fn new(settings: &EspeakSettings, timeout: Duration) -> Self {
        Self {
            descriptor: EngineDescriptor {
                id: ESPEAK_ENGINE_ID.to_string(),
                output_format: AudioFormat::Wav,
                local: true,
                default_voice: settings.voice.clone(),
                voices: vec![settings.voice.clone()],
            },
            binary: settings.binary.clone(),
            words_per_minute: settings.words_per_minute,
            timeout,
        }
    }
}

#[async_trait]
impl SynthesisEngine for EspeakEngine {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioArtifact, SynthesisError> {
        let voice = request
            .voice
            .as_deref()
            .map(str::trim)
            .unwrap_or(&self.descriptor.default_voice);
        let rate = ((self.words_per_minute as f32) * request.speed).round().max(80.0) as u32;

        let mut command = Command::new(&self.binary);
        command
            .arg("--stdout")
            .args(["-v", voice])
            .arg("-s")
            .arg(rate.to_string())
            .arg("--")
            .arg(&request.text);

        let output = run_with_timeout(command, self.timeout)
            .await
            .map_err(|e| match e {
                CommandFailure::Spawn { .. } => SynthesisError::Unavailable(e.to_string()),
                other => SynthesisError::EngineFailed(other.to_string()),
            })?;

        if output.stdout.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(AudioArtifact::new(output.stdout, AudioFormat::Wav))
    }
}
