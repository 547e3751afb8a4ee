mod artifact_janitor;
mod engine_registry;
mod fallback_tone;
mod format_normalizer;
mod lazy_capability;
mod reply_generator;
mod stage_outcome;
mod synthesis_router;
mod transcription_adapter;
mod turn_orchestrator;
pub mod wav_codec;

pub use artifact_janitor::ArtifactJanitor;
pub use engine_registry::{EngineRegistry, ResolvedEngine, normalize_engine_id};
pub use fallback_tone::{FallbackTone, TONE_DURATION_MS, TONE_FREQUENCY_HZ, TONE_SAMPLE_RATE};
pub use format_normalizer::FormatNormalizer;
pub use lazy_capability::{CapabilityBuilder, LazyCapability};
pub use reply_generator::{DEFAULT_FALLBACK_REPLY, DEFAULT_SYSTEM_PROMPT, ReplyGenerator};
pub use stage_outcome::StageOutcome;
pub use synthesis_router::{SynthesisDefaults, SynthesisOutcome, SynthesisRouter};
pub use transcription_adapter::{DEFAULT_TRANSCRIPT_PLACEHOLDER, TranscriptionAdapter};
pub use turn_orchestrator::{
    EMPTY_TEXT_MESSAGE, SpeakRequest, SpeakResult, TurnError, TurnOrchestrator, TurnRequest,
    TurnResult,
};
