mod audio_artifact;
mod audio_format;
mod pcm_audio;
mod session_id;
mod storage_path;
mod turn;
mod turn_stage;

pub use audio_artifact::AudioArtifact;
pub use audio_format::AudioFormat;
pub use pcm_audio::{PcmAudio, TARGET_SAMPLE_RATE};
pub use session_id::SessionId;
pub use storage_path::StoragePath;
pub use turn::{Degradation, Turn};
pub use turn_stage::TurnStage;
