use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioConverter, AudioConverterError};
use crate::domain::{AudioFormat, PcmAudio, TARGET_SAMPLE_RATE};

/// In-process decoder. Always available; covers the containers symphonia
/// knows (WAV, MP3, OGG/Vorbis, FLAC, AAC/MP4) but not Opus or WebM.
pub struct SymphoniaConverter;

#[async_trait]
impl AudioConverter for SymphoniaConverter {
    fn name(&self) -> &'static str {
        "symphonia"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn convert(&self, input: &Path, _workdir: &Path) -> Result<PcmAudio, AudioConverterError> {
        let data = tokio::fs::read(input).await?;
        tokio::task::spawn_blocking(move || decode_to_pcm(&data))
            .await
            .map_err(|e| AudioConverterError::ConversionFailed(format!("decode task: {}", e)))?
    }
}

pub fn decode_to_pcm(data: &[u8]) -> Result<PcmAudio, AudioConverterError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    if let Some(format) = AudioFormat::sniff(data) {
        hint.with_extension(format.extension());
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioConverterError::ConversionFailed(format!("probe: {}", e)))?;

    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| {
        AudioConverterError::ConversionFailed("no audio track found".to_string())
    })?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_rate = codec_params.sample_rate.ok_or_else(|| {
        AudioConverterError::ConversionFailed("unknown sample rate".to_string())
    })?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AudioConverterError::ConversionFailed(format!("codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(AudioConverterError::ConversionFailed(format!(
                    "packet: {}",
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => {
                return Err(AudioConverterError::ConversionFailed(format!(
                    "decode: {}",
                    e
                )));
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let interleaved = sample_buf.samples();

        if channels > 1 {
            for frame in interleaved.chunks(channels) {
                samples.push(frame.iter().sum::<f32>() / channels as f32);
            }
        } else {
            samples.extend_from_slice(interleaved);
        }
    }

    if samples.is_empty() {
        return Err(AudioConverterError::EmptyOutput);
    }

    if source_rate != TARGET_SAMPLE_RATE {
        samples = resample(&samples, source_rate, TARGET_SAMPLE_RATE)?;
    }

    tracing::debug!(
        samples = samples.len(),
        source_rate,
        "Audio decoded to 16kHz mono PCM"
    );

    Ok(PcmAudio::new(samples, TARGET_SAMPLE_RATE))
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AudioConverterError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| AudioConverterError::ConversionFailed(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let mut input = chunk.to_vec();
        input.resize(chunk_size, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| AudioConverterError::ConversionFailed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    output.truncate((samples.len() as f64 * ratio) as usize);

    Ok(output)
}
