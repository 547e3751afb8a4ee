use std::sync::Arc;

use bytes::Bytes;
use tracing::Instrument;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, BackendError, TranscriptionInput,
};
use crate::domain::{AudioArtifact, SessionId, Turn, TurnStage};

use super::format_normalizer::FormatNormalizer;
use super::reply_generator::ReplyGenerator;
use super::synthesis_router::SynthesisRouter;
use super::transcription_adapter::TranscriptionAdapter;

pub const EMPTY_TEXT_MESSAGE: &str = "Please enter some text.";

#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub audio: Bytes,
    pub engine: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub session_id: SessionId,
    pub transcription: String,
    pub text: String,
    pub audio_url: String,
    pub engine: String,
    pub degraded: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SpeakRequest {
    pub text: String,
    pub engine: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakResult {
    pub session_id: SessionId,
    pub audio_url: String,
    pub engine: String,
    pub characters: usize,
    pub status: String,
    pub fallback: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("storage failure: {0}")]
    StorageFailure(#[from] ArtifactStoreError),
}

/// Drives one turn through normalization, transcription, reply generation,
/// synthesis and storage. Backend failures never stop a turn; only storage
/// errors and bad caller input are reported back.
pub struct TurnOrchestrator {
    normalizer: FormatNormalizer,
    transcriber: TranscriptionAdapter,
    replier: ReplyGenerator,
    router: SynthesisRouter,
    store: Arc<dyn ArtifactStore>,
    audio_route: String,
}

impl TurnOrchestrator {
    pub fn new(
        normalizer: FormatNormalizer,
        transcriber: TranscriptionAdapter,
        replier: ReplyGenerator,
        router: SynthesisRouter,
        store: Arc<dyn ArtifactStore>,
        audio_route: impl Into<String>,
    ) -> Self {
        let audio_route = audio_route.into().trim_end_matches('/').to_string();
        Self {
            normalizer,
            transcriber,
            replier,
            router,
            store,
            audio_route,
        }
    }

    pub fn normalizer(&self) -> &FormatNormalizer {
        &self.normalizer
    }

    pub fn router(&self) -> &SynthesisRouter {
        &self.router
    }

    pub fn transcriber(&self) -> &TranscriptionAdapter {
        &self.transcriber
    }

    pub fn replier(&self) -> &ReplyGenerator {
        &self.replier
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    pub fn audio_url(&self, session_id: &SessionId) -> String {
        format!("{}/{}", self.audio_route, session_id)
    }

    pub async fn run_turn(&self, request: TurnRequest) -> Result<TurnResult, TurnError> {
        let turn = Turn::ingest(request.audio, request.engine);
        let span = tracing::info_span!(
            "turn",
            session_id = %turn.session_id,
            requested_engine = turn.requested_engine.as_deref().unwrap_or("")
        );
        self.drive(turn).instrument(span).await
    }

    async fn drive(&self, mut turn: Turn) -> Result<TurnResult, TurnError> {
        let raw = turn.take_raw_audio();
        tracing::info!(bytes = raw.len(), "Turn ingested");

        match self.normalizer.normalize(&turn.session_id, &raw).await {
            Ok(pcm) => turn.normalized_audio = Some(pcm),
            Err(cause) => self.note(&mut turn, TurnStage::Normalized, &cause),
        }
        turn.advance();

        let input = match turn.normalized_audio.take() {
            Some(pcm) => TranscriptionInput::Pcm(pcm),
            None => TranscriptionInput::Raw(raw),
        };
        let (transcript, cause) = self.transcriber.transcribe(&input).await.into_parts();
        drop(input);
        if let Some(cause) = cause {
            self.note(&mut turn, TurnStage::Transcribed, &cause);
        }
        turn.transcript = Some(transcript);
        turn.advance();

        let (reply, cause) = self
            .replier
            .generate(turn.transcript.as_deref().unwrap_or_default())
            .await
            .into_parts();
        if let Some(cause) = cause {
            self.note(&mut turn, TurnStage::Replied, &cause);
        }
        turn.reply = Some(reply);
        turn.advance();

        let outcome = self
            .router
            .synthesize(
                turn.reply.as_deref().unwrap_or_default(),
                turn.requested_engine.as_deref(),
                None,
            )
            .await;
        if let Some(cause) = &outcome.cause {
            self.note(&mut turn, TurnStage::Synthesized, cause);
        }
        turn.resolved_engine = Some(outcome.engine);
        turn.output_audio = Some(outcome.audio);
        turn.advance();

        if let Some(audio) = &turn.output_audio {
            self.persist(&turn.session_id, audio).await?;
        }
        turn.advance();
        turn.advance();

        tracing::info!(
            stage = %turn.stage,
            degraded = turn.degradations.len(),
            elapsed_ms = (chrono::Utc::now() - turn.started_at).num_milliseconds(),
            "Turn complete"
        );

        Ok(TurnResult {
            session_id: turn.session_id,
            audio_url: self.audio_url(&turn.session_id),
            degraded: turn.degraded_stages(),
            transcription: turn.transcript.unwrap_or_default(),
            text: turn.reply.unwrap_or_default(),
            engine: turn.resolved_engine.unwrap_or_default(),
        })
    }

    /// Direct text-to-speech without the listening half of the pipeline.
    pub async fn speak(&self, request: SpeakRequest) -> Result<SpeakResult, TurnError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(TurnError::InvalidRequest(EMPTY_TEXT_MESSAGE.to_string()));
        }

        let session_id = SessionId::new();
        let characters = text.chars().count();
        let span = tracing::info_span!("speak", session_id = %session_id);

        async {
            let outcome = self
                .router
                .synthesize(text, request.engine.as_deref(), request.voice.as_deref())
                .await;

            self.persist(&session_id, &outcome.audio).await?;

            let status = match &outcome.cause {
                None => format!("Success: Rendered {} characters.", characters),
                Some(cause) => format!("Engine Error: {}", cause),
            };

            Ok::<_, TurnError>(SpeakResult {
                session_id,
                audio_url: self.audio_url(&session_id),
                engine: outcome.engine,
                characters,
                status,
                fallback: outcome.cause.is_some(),
            })
        }
        .instrument(span)
        .await
    }

    async fn persist(
        &self,
        session_id: &SessionId,
        audio: &AudioArtifact,
    ) -> Result<(), TurnError> {
        let path = self.store.put(session_id, audio).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store output audio");
            TurnError::StorageFailure(e)
        })?;
        tracing::debug!(path = %path, bytes = audio.len(), "Output audio stored");
        Ok(())
    }

    fn note(&self, turn: &mut Turn, stage: TurnStage, cause: &BackendError) {
        tracing::debug!(stage = %stage, kind = cause.kind(), "Stage degraded");
        turn.record_degradation(stage, cause.to_string());
    }
}
