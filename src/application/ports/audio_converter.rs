use std::io;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::PcmAudio;

/// One strategy for turning a compressed container into mono 16 kHz PCM.
#[async_trait]
pub trait AudioConverter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Missing binaries or unsupported platforms report `false`; that is not an error.
    async fn is_available(&self) -> bool;

    /// `input` holds the raw upload; scratch output goes under `workdir`.
    async fn convert(&self, input: &Path, workdir: &Path) -> Result<PcmAudio, AudioConverterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioConverterError {
    #[error("converter unavailable: {0}")]
    Unavailable(String),
    #[error("converter produced no audio")]
    EmptyOutput,
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
    #[error("conversion timed out after {0:?}")]
    TimedOut(Duration),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
