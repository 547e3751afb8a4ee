use reqwest::multipart;

use crate::application::ports::{TranscriptionError, TranscriptionInput};
use crate::application::services::wav_codec;
use crate::domain::AudioFormat;

/// Turns the transcription input into the multipart `file` field. PCM goes up
/// as 16-bit WAV; raw uploads keep their bytes and get an extension matching
/// the sniffed container so the backend can pick a decoder.
pub(super) fn audio_file_part(input: &TranscriptionInput) -> Result<multipart::Part, TranscriptionError> {
    let (data, file_name, mime) = match input {
        TranscriptionInput::Pcm(pcm) => {
            let wav = wav_codec::encode_pcm16(pcm)
                .map_err(|e| TranscriptionError::EncodingFailed(e.to_string()))?;
            (wav, "audio.wav".to_string(), AudioFormat::Wav.as_mime())
        }
        TranscriptionInput::Raw(bytes) => match AudioFormat::sniff(bytes) {
            Some(format) => (
                bytes.to_vec(),
                format!("audio.{}", format.extension()),
                format.as_mime(),
            ),
            None => (
                bytes.to_vec(),
                "audio.bin".to_string(),
                "application/octet-stream",
            ),
        },
    };

    multipart::Part::bytes(data)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))
}

pub(super) async fn rejection(response: reqwest::Response) -> TranscriptionError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    TranscriptionError::Rejected { status, body }
}
