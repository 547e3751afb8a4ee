use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{AudioConverter, BackendError};
use crate::domain::{PcmAudio, SessionId};

/// Tries each converter in order and keeps the first non-empty result.
pub struct FormatNormalizer {
    converters: Vec<Arc<dyn AudioConverter>>,
    scratch_root: PathBuf,
}

impl FormatNormalizer {
    pub fn new(converters: Vec<Arc<dyn AudioConverter>>, scratch_root: PathBuf) -> Self {
        Self {
            converters,
            scratch_root,
        }
    }

    pub fn converter_names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// The raw upload is staged in a scratch directory named after the session.
    /// The directory is removed when this returns, whichever converter won.
    pub async fn normalize(
        &self,
        session_id: &SessionId,
        raw: &[u8],
    ) -> Result<PcmAudio, BackendError> {
        if raw.is_empty() {
            return Err(BackendError::FormatUnsupported("empty input".to_string()));
        }

        tokio::fs::create_dir_all(&self.scratch_root)
            .await
            .map_err(|e| BackendError::FormatUnsupported(format!("scratch dir: {}", e)))?;

        let workdir = tempfile::Builder::new()
            .prefix(&format!("turn-{}-", session_id))
            .tempdir_in(&self.scratch_root)
            .map_err(|e| BackendError::FormatUnsupported(format!("scratch dir: {}", e)))?;

        let input_path = workdir.path().join("input.bin");
        tokio::fs::write(&input_path, raw)
            .await
            .map_err(|e| BackendError::FormatUnsupported(format!("stage input: {}", e)))?;

        let mut failures: Vec<String> = Vec::new();

        for converter in &self.converters {
            if !converter.is_available().await {
                tracing::debug!(converter = converter.name(), "Converter unavailable, skipping");
                continue;
            }

            match converter.convert(&input_path, workdir.path()).await {
                Ok(pcm) if !pcm.is_empty() => {
                    tracing::debug!(
                        converter = converter.name(),
                        samples = pcm.samples.len(),
                        duration_secs = pcm.duration().as_secs_f32(),
                        "Input audio normalized"
                    );
                    return Ok(pcm);
                }
                Ok(_) => {
                    tracing::warn!(converter = converter.name(), "Converter produced empty output");
                    failures.push(format!("{}: empty output", converter.name()));
                }
                Err(e) => {
                    tracing::warn!(converter = converter.name(), error = %e, "Converter failed");
                    failures.push(format!("{}: {}", converter.name(), e));
                }
            }
        }

        let reason = if failures.is_empty() {
            "no converter available".to_string()
        } else {
            failures.join("; ")
        };

        Err(BackendError::FormatUnsupported(reason))
    }
}
