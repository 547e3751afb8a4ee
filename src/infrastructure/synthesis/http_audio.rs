use crate::application::ports::SynthesisError;
use crate::domain::{AudioArtifact, AudioFormat};

/// Reads a synthesis response body. Anything but a 2xx with a non-empty body
/// is a failure.
pub(super) async fn audio_from_response(
    response: reqwest::Response,
    format: AudioFormat,
) -> Result<AudioArtifact, SynthesisError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SynthesisError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SynthesisError::RequestFailed(format!("body: {}", e)))?;

    if bytes.is_empty() {
        return Err(SynthesisError::EmptyAudio);
    }

    Ok(AudioArtifact::new(bytes, format))
}

pub(super) fn require_key<'a>(
    key: Option<&'a str>,
    engine: &str,
) -> Result<&'a str, SynthesisError> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| SynthesisError::MissingCredentials(format!("{} api key is not configured", engine)))
}
