use std::sync::Arc;

use crate::application::ports::AudioConverter;
use crate::presentation::config::NormalizerSettings;

use super::afconvert_converter::AfconvertConverter;
use super::ffmpeg_converter::FfmpegConverter;
use super::symphonia_converter::SymphoniaConverter;

pub struct AudioConverterFactory;

impl AudioConverterFactory {
    /// Builds the converter chain in configured order.
    pub fn create(settings: &NormalizerSettings) -> Vec<Arc<dyn AudioConverter>> {
        let mut converters: Vec<Arc<dyn AudioConverter>> = Vec::new();

        for name in &settings.converters {
            match name.trim().to_lowercase().as_str() {
                "ffmpeg" => converters.push(Arc::new(FfmpegConverter::new(
                    settings.ffmpeg_path.clone(),
                    settings.timeout(),
                ))),
                "afconvert" => converters.push(Arc::new(AfconvertConverter::new(
                    settings.afconvert_path.clone(),
                    settings.timeout(),
                ))),
                "symphonia" => converters.push(Arc::new(SymphoniaConverter)),
                other => tracing::warn!(converter = other, "Unknown audio converter ignored"),
            }
        }

        converters
    }
}
