mod azure_speech_engine;
mod elevenlabs_engine;
mod espeak_engine;
mod http_audio;
mod openai_speech_engine;
mod synthesis_engine_factory;

pub use azure_speech_engine::{AZURE_ENGINE_ID, AzureSpeechEngine, build_ssml};
pub use elevenlabs_engine::{ELEVENLABS_ENGINE_ID, ElevenLabsEngine};
pub use espeak_engine::{ESPEAK_ENGINE_ID, EspeakEngine};
pub use openai_speech_engine::{OPENAI_ENGINE_ID, OpenAiSpeechEngine};
pub use synthesis_engine_factory::SynthesisEngineFactory;
