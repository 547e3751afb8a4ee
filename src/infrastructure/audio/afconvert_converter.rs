use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;

use crate::application::ports::{AudioConverter, AudioConverterError};
use crate::application::services::wav_codec;
use crate::domain::{PcmAudio, TARGET_SAMPLE_RATE};
use crate::infrastructure::process::{binary_responds, run_with_timeout};

use super::ffmpeg_converter::converter_error;

/// macOS Core Audio command-line converter. Reports unavailable elsewhere.
pub struct AfconvertConverter {
    binary: String,
    timeout: Duration,
    available: OnceCell<bool>,
}

impl AfconvertConverter {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            available: OnceCell::new(),
        }
    }
}

#[async_trait]
impl AudioConverter for AfconvertConverter {
    fn name(&self) -> &'static str {
        "afconvert"
    }

    async fn is_available(&self) -> bool {
        if !cfg!(target_os = "macos") {
            return false;
        }
        *self
            .available
            .get_or_init(|| binary_responds(&self.binary, &["-h"], false))
            .await
    }

    async fn convert(&self, input: &Path, workdir: &Path) -> Result<PcmAudio, AudioConverterError> {
        let output_path = workdir.join("afconvert.wav");
        let data_format = format!("LEI16@{}", TARGET_SAMPLE_RATE);

        let mut command = Command::new(&self.binary);
        command
            .args(["-f", "WAVE", "-d", data_format.as_str(), "-c", "1"])
            .arg(input)
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
