use std::time::Duration;

use crate::application::ports::{BackendError, TranscriptionEngine, TranscriptionInput};

use super::lazy_capability::LazyCapability;
use super::stage_outcome::StageOutcome;

pub const DEFAULT_TRANSCRIPT_PLACEHOLDER: &str = "Sorry, I could not hear you.";

pub struct TranscriptionAdapter {
    engine: LazyCapability<dyn TranscriptionEngine>,
    timeout: Duration,
    placeholder: String,
}

impl TranscriptionAdapter {
    pub fn new(
        engine: LazyCapability<dyn TranscriptionEngine>,
        timeout: Duration,
        placeholder: impl Into<String>,
    ) -> Self {
        let placeholder = placeholder.into();
        let placeholder = if placeholder.trim().is_empty() {
            DEFAULT_TRANSCRIPT_PLACEHOLDER.to_string()
        } else {
            placeholder
        };

        Self {
            engine,
            timeout,
            placeholder,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn engine(&self) -> &LazyCapability<dyn TranscriptionEngine> {
        &self.engine
    }

    /// Never fails: anything short of a non-empty transcript becomes the placeholder.
    pub async fn transcribe(&self, input: &TranscriptionInput) -> StageOutcome<String> {
        if input.is_empty() {
            return self.degraded(BackendError::FormatUnsupported(
                "no audio to transcribe".to_string(),
            ));
        }

        let engine = match self.engine.get().await {
            Ok(engine) => engine,
            Err(cause) => return self.degraded(cause),
        };

        tracing::debug!(engine = engine.name(), input = input.kind(), "Transcribing turn audio");

        match tokio::time::timeout(self.timeout, engine.transcribe(input)).await {
            Err(_) => self.degraded(BackendError::Timeout(self.timeout)),
            Ok(Err(e)) => self.degraded(e.into()),
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    self.degraded(BackendError::Rejected(
                        "engine returned an empty transcript".to_string(),
                    ))
                } else {
                    StageOutcome::Real(text.to_string())
                }
            }
        }
    }

    fn degraded(&self, cause: BackendError) -> StageOutcome<String> {
        tracing::warn!(cause = %cause, kind = cause.kind(), "Transcription degraded to placeholder");
        StageOutcome::degraded(self.placeholder.clone(), cause)
    }
}
