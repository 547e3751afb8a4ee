use std::time::Duration;

use voiceturn::application::ports::{AudioConverter, AudioConverterError};
use voiceturn::application::services::wav_codec;
use voiceturn::domain::TARGET_SAMPLE_RATE;
use voiceturn::infrastructure::audio::symphonia_converter::decode_to_pcm;
use voiceturn::infrastructure::audio::{AudioConverterFactory, FfmpegConverter, SymphoniaConverter};
use voiceturn::presentation::config::NormalizerSettings;

use crate::helpers::{binary_available, sine_wav};

#[test]
fn given_sine_fixture_when_reading_with_wav_codec_then_rate_and_length_match() {
    let pcm = wav_codec::decode(&sine_wav(22_050, 100)).unwrap();

    assert_eq!(pcm.sample_rate, 22_050);
    assert_eq!(pcm.samples.len(), 2_205);
    assert!(pcm.samples.iter().any(|s| s.abs() > 0.1));
}

#[test]
fn given_44k_wav_when_decoding_then_resampled_to_16k_mono() {
    let pcm = decode_to_pcm(&sine_wav(44_100, 500)).unwrap();

    assert_eq!(pcm.sample_rate, TARGET_SAMPLE_RATE);
    let expected = 8_000.0;
    let actual = pcm.samples.len() as f32;
    assert!(
        (actual - expected).abs() / expected < 0.05,
        "expected about {} samples, got {}",
        expected,
        actual
    );
    assert!(pcm.samples.iter().any(|s| s.abs() > 0.1));
}

#[test]
fn given_16k_wav_when_decoding_then_samples_are_kept_as_is() {
    let pcm = decode_to_pcm(&sine_wav(16_000, 250)).unwrap();

    assert_eq!(pcm.samples.len(), 4_000);
    assert!(pcm.is_canonical());
}

#[test]
fn given_garbage_when_decoding_then_conversion_failed() {
    let result = decode_to_pcm(b"this is not a media container");

    assert!(matches!(result, Err(AudioConverterError::ConversionFailed(_))));
}

#[tokio::test]
async fn given_staged_file_when_symphonia_converts_then_pcm_is_returned() {
    let workdir = tempfile::TempDir::new().unwrap();
    let input = workdir.path().join("input.bin");
    std::fs::write(&input, sine_wav(22_050, 200)).unwrap();

    let converter = SymphoniaConverter;
    assert!(converter.is_available().await);
    let pcm = converter.convert(&input, workdir.path()).await.unwrap();

    assert!(pcm.is_canonical());
    assert!(!pcm.is_empty());
}

#[tokio::test]
async fn given_missing_ffmpeg_binary_when_probing_then_reported_unavailable() {
    let converter = FfmpegConverter::new("definitely-not-ffmpeg-xyz", Duration::from_secs(5));

    assert!(!converter.is_available().await);
}

#[tokio::test]
async fn given_ffmpeg_installed_when_converting_wav_then_16k_mono_pcm() {
    if !binary_available("ffmpeg", "-version") {
        eprintln!("ffmpeg not installed, skipping");
        return;
    }
    let workdir = tempfile::TempDir::new().unwrap();
    let input = workdir.path().join("input.bin");
    std::fs::write(&input, sine_wav(48_000, 300)).unwrap();

    let converter = FfmpegConverter::new("ffmpeg", Duration::from_secs(30));
    let pcm = converter.convert(&input, workdir.path()).await.unwrap();

    assert!(pcm.is_canonical());
    assert!((pcm.samples.len() as i64 - 4_800).abs() < 400);
}

#[tokio::test]
async fn given_ffmpeg_installed_when_input_is_garbage_then_conversion_failed() {
    if !binary_available("ffmpeg", "-version") {
        eprintln!("ffmpeg not installed, skipping");
        return;
    }
    let workdir = tempfile::TempDir::new().unwrap();
    let input = workdir.path().join("input.bin");
    std::fs::write(&input, b"garbage bytes").unwrap();

    let converter = FfmpegConverter::new("ffmpeg", Duration::from_secs(30));
    let result = converter.convert(&input, workdir.path()).await;

    assert!(matches!(result, Err(AudioConverterError::ConversionFailed(_))));
}

#[test]
fn given_configured_order_when_building_chain_then_order_is_kept_and_unknown_names_skipped() {
    let settings = NormalizerSettings {
        converters: vec![
            "Symphonia".to_string(),
            "wat".to_string(),
            "ffmpeg".to_string(),
        ],
        ..NormalizerSettings::default()
    };

    let names: Vec<&str> = AudioConverterFactory::create(&settings)
        .iter()
        .map(|c| c.name())
        .collect();

    assert_eq!(names, vec!["symphonia", "ffmpeg"]);
}
