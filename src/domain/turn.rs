use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::audio_artifact::AudioArtifact;
use super::pcm_audio::PcmAudio;
use super::session_id::SessionId;
use super::turn_stage::TurnStage;

/// A stage that produced a degraded value instead of its real output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    pub stage: TurnStage,
    pub cause: String,
}

/// One ingestion-to-artifact cycle.
#[derive(Debug)]
pub struct Turn {
    pub session_id: SessionId,
    pub stage: TurnStage,
    pub requested_engine: Option<String>,
    pub resolved_engine: Option<String>,
    pub raw_audio: Option<Bytes>,
    pub normalized_audio: Option<PcmAudio>,
    pub transcript: Option<String>,
    pub reply: Option<String>,
    pub output_audio: Option<AudioArtifact>,
    pub degradations: Vec<Degradation>,
    pub started_at: DateTime<Utc>,
}

impl Turn {
    pub fn ingest(raw_audio: Bytes, requested_engine: Option<String>) -> Self {
        Self {
            session_id: SessionId::new(),
            stage: TurnStage::Ingested,
            requested_engine,
            resolved_engine: None,
            raw_audio: Some(raw_audio),
            normalized_audio: None,
            transcript: None,
            reply: None,
            output_audio: None,
            degradations: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn advance(&mut self) -> TurnStage {
        self.stage = self.stage.next();
        self.stage
    }

    /// Hands the raw input over to whoever consumes it. Only the first call gets the bytes.
    pub fn take_raw_audio(&mut self) -> Bytes {
        self.raw_audio.take().unwrap_or_default()
    }

    pub fn record_degradation(&mut self, stage: TurnStage, cause: impl Into<String>) {
        self.degradations.push(Degradation {
            stage,
            cause: cause.into(),
        });
    }

    pub fn degraded_stages(&self) -> Vec<String> {
        self.degradations
            .iter()
            .map(|d| d.stage.as_str().to_string())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.stage == TurnStage::Complete
    }
}
