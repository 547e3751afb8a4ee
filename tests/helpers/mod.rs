#![allow(dead_code)]


use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voiceturn::presentation::config::{
    ArtifactProviderSetting, Settings, TranscriptionProviderSetting,
};

pub fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
    cursor.into_inner()
}

/// A short 16-bit sine clip, loud enough to be non-silent.
pub fn sine_wav(sample_rate: u32, millis: u32) -> Vec<u8> {
    let count = (sample_rate * millis / 1000) as usize;
    let samples: Vec<i16> = (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            ((t * 220.0 * std::f32::consts::TAU).sin() * 8000.0) as i16
        })
        .collect();
    build_wav(sample_rate, &samples)
}

pub fn binary_available(binary: &str, arg: &str) -> bool {
    std::process::Command::new(binary)
        .arg(arg)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

/// Settings that never reach a real backend: in-memory artifacts, no
/// transcription, no LLM credentials and only the in-process converter.
pub fn offline_settings() -> Settings {
    let mut settings = Settings::default();
    settings.artifacts.provider = ArtifactProviderSetting::Memory;
    settings.normalizer.converters = vec!["symphonia".to_string()];
    settings.transcription.provider = TranscriptionProviderSetting::Disabled;
    settings.llm.api_key = None;
    settings.llm.base_url = None;
    settings.synthesis.openai.api_key = None;
    settings.synthesis.elevenlabs.api_key = None;
    settings.synthesis.azure.api_key = None;
    settings.synthesis.espeak.enabled = false;
    settings.synthesis.timeout_secs = 5;
    settings
}
