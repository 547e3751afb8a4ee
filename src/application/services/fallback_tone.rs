use crate::domain::{AudioArtifact, AudioFormat, PcmAudio};

use super::wav_codec;

pub const TONE_FREQUENCY_HZ: f32 = 440.0;
pub const TONE_SAMPLE_RATE: u32 = 16_000;
pub const TONE_DURATION_MS: u32 = 1_000;
const TONE_AMPLITUDE: f32 = 0.25;

/// Placeholder audio used when no synthesis backend produced anything.
///
/// The WAV is rendered once at construction and handed out as a cheap clone,
/// so serving it during a turn cannot fail.
#[derive(Debug, Clone)]
pub struct FallbackTone {
    artifact: AudioArtifact,
}

impl FallbackTone {
    pub fn new() -> Result<Self, hound::Error> {
        let wav = wav_codec::encode_pcm16(&Self::pcm())?;
        Ok(Self {
            artifact: AudioArtifact::new(wav, AudioFormat::Wav),
        })
    }

    pub fn artifact(&self) -> AudioArtifact {
        self.artifact.clone()
    }

    pub fn pcm() -> PcmAudio {
        let total = (TONE_SAMPLE_RATE as u64 * TONE_DURATION_MS as u64 / 1_000) as usize;
        let step = 2.0 * std::f32::consts::PI * TONE_FREQUENCY_HZ / TONE_SAMPLE_RATE as f32;
        let samples = (0..total)
            .map(|n| TONE_AMPLITUDE * (step * n as f32).sin())
            .collect();
        PcmAudio::new(samples, TONE_SAMPLE_RATE)
    }
}
