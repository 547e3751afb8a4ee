mod afconvert_converter;
mod azure_whisper_engine;
mod converter_factory;
mod ffmpeg_converter;
mod openai_whisper_engine;
pub mod symphonia_converter;
mod transcription_engine_factory;
mod upload_part;

pub use afconvert_converter::AfconvertConverter;
pub use azure_whisper_engine::AzureWhisperEngine;
pub use converter_factory::AudioConverterFactory;
pub use ffmpeg_converter::FfmpegConverter;
pub use openai_whisper_engine::{OPENAI_API_BASE, OpenAiWhisperEngine};
pub use symphonia_converter::SymphoniaConverter;
pub use transcription_engine_factory::TranscriptionEngineFactory;
