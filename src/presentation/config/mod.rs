mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ArtifactProviderSetting, ArtifactSettings, AzureSpeechSettings, ENV_PREFIX, ENV_SEPARATOR,
    ElevenLabsSettings, EspeakSettings, LlmSettings, LoggingSettings, NormalizerSettings,
    OpenAiSpeechSettings, PipelineSettings, ServerSettings, Settings, SynthesisSettings,
    TranscriptionProviderSetting, TranscriptionSettings,
};
