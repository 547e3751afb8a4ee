use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::PcmAudio;

use super::backend_error::BackendError;

/// What the transcription stage receives: normalized PCM, or the untouched
/// upload when no converter could decode it.
#[derive(Debug, Clone)]
pub enum TranscriptionInput {
    Pcm(PcmAudio),
    Raw(Bytes),
}

impl TranscriptionInput {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Pcm(pcm) => pcm.is_empty(),
            Self::Raw(bytes) => bytes.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pcm(_) => "pcm",
            Self::Raw(_) => "raw",
        }
    }
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    fn name(&self) -> &'static str;

    async fn transcribe(&self, input: &TranscriptionInput) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio encoding failed: {0}")]
    EncodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("engine initialization failed: {0}")]
    InitializationFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("api rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<TranscriptionError> for BackendError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::InitializationFailed(msg) => BackendError::Unavailable(msg),
            TranscriptionError::EncodingFailed(msg) => BackendError::FormatUnsupported(msg),
            other => BackendError::Rejected(other.to_string()),
        }
    }
}
