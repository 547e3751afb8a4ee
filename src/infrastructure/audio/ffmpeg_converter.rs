use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;

use crate::application::ports::{AudioConverter, AudioConverterError};
use crate::application::services::wav_codec;
use crate::domain::{PcmAudio, TARGET_SAMPLE_RATE};
use crate::infrastructure::process::{CommandFailure, binary_responds, run_with_timeout};

pub struct FfmpegConverter {
    binary: String,
    timeout: Duration,
    available: OnceCell<bool>,
}

impl FfmpegConverter {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            available: OnceCell::new(),
        }
    }
}

#[async_trait]
impl AudioConverter for FfmpegConverter {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    async fn is_available(&self) -> bool {
        *self
            .available
            .get_or_init(|| binary_responds(&self.binary, &["-version"], true))
            .await
    }

    async fn convert(&self, input: &Path, workdir: &Path) -> Result<PcmAudio, AudioConverterError> {
        let output_path = workdir.join("ffmpeg.wav");
        let sample_rate = TARGET_SAMPLE_RATE.to_string();

        let mut command = Command::new(&self.binary);
        command
            .args(["-nostdin", "-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-ar", sample_rate.as_str(), "-ac", "1", "-f", "wav"])
            .arg(&output_path);

        run_with_timeout(command, self.timeout)
            .await
            .map_err(|e| converter_error(e, self.timeout))?;

        let wav = tokio::fs::read(&output_path).await?;
        let pcm = wav_codec::decode(&wav)
            .map_err(|e| AudioConverterError::ConversionFailed(format!("wav: {}", e)))?;

        if pcm.is_empty() {
            return Err(AudioConverterError::EmptyOutput);
        }

        Ok(pcm)
    }
}

pub(super) fn converter_error(failure: CommandFailure, timeout: Duration) -> AudioConverterError {
    match failure {
        CommandFailure::Spawn { program, source } => {
            AudioConverterError::Unavailable(format!("{}: {}", program, source))
        }
        CommandFailure::TimedOut { .. } => AudioConverterError::TimedOut(timeout),
        exited @ CommandFailure::Exited { .. } => {
            AudioConverterError::ConversionFailed(exited.to_string())
        }
    }
}
