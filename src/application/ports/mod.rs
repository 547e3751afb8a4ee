mod artifact_store;
mod audio_converter;
mod backend_error;
mod llm_client;
mod synthesis_engine;
mod transcription_engine;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use audio_converter::{AudioConverter, AudioConverterError};
pub use backend_error::BackendError;
pub use llm_client::{LlmClient, LlmClientError};
pub use synthesis_engine::{
    EngineDescriptor, SynthesisEngine, SynthesisError, SynthesisRequest, voice_slug,
};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError, TranscriptionInput};
