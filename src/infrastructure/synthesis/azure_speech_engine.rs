use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{EngineDescriptor, SynthesisEngine, SynthesisError, SynthesisRequest};
use crate::domain::{AudioArtifact, AudioFormat};
use crate::presentation::config::AzureSpeechSettings;

use super::http_audio::{audio_from_response, require_key};

pub const AZURE_ENGINE_ID: &str = "azure";
const DEFAULT_OUTPUT_FORMAT: &str = "riff-16khz-16bit-mono-pcm";

pub struct AzureSpeechEngine {
    client: Client,
    descriptor: EngineDescriptor,
    api_key: Option<String>,
    endpoint: String,
    locale: String,
    output_format: String,
}

/// `riff-…` → wav, `audio-…-mp3` → mp3, `ogg-…` → ogg, `webm-…` → webm.
/// `raw-…` and the other headerless streams are not supported.
fn format_of(output_format: &str) -> Option<AudioFormat> {
    let lowered = output_format.to_ascii_lowercase();
    if lowered.starts_with("riff-") {
        Some(AudioFormat::Wav)
    } else if lowered.starts_with("ogg-") {
        Some(AudioFormat::Ogg)
    } else if lowered.starts_with("webm-") {
        Some(AudioFormat::Webm)
    } else if lowered.starts_with("audio-") && lowered.ends_with("-mp3") {
        Some(AudioFormat::Mp3)
    } else {
        None
    }
}

impl AzureSpeechEngine {
    pub fn new(settings: &AzureSpeechSettings) -> Self {
        let endpoint = settings.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                settings.region.trim()
            )
        });

        let requested = settings.output_format.trim();
        let (output_format, format) = match format_of(requested) {
            Some(format) => (requested.to_string(), format),
            None => {
                tracing::warn!(
                    output_format = %requested,
                    "Unsupported Azure speech output format, using {}",
                    DEFAULT_OUTPUT_FORMAT
                );
                (DEFAULT_OUTPUT_FORMAT.to_string(), AudioFormat::Wav)
            }
        };

        Self {
            client: Client::new(),
            descriptor: EngineDescriptor {
                id: AZURE_ENGINE_ID.to_string(),
                output_format: format,
                local: false,
                default_voice: settings.voice.clone(),
                voices: vec![settings.voice.clone()],
            },
            api_key: settings.api_key.clone(),
            endpoint,
            locale: settings.locale.clone(),
            output_format,
        }
    }
}

pub fn build_ssml(locale: &str, voice: &str, style: Option<&str>, speed: f32, text: &str) -> String {
    let rate = ((speed - 1.0) * 100.0).round() as i32;
    let prosody = format!(
        "<prosody rate=\"{:+}%\">{}</prosody>",
        rate,
        escape_xml(text)
    );
    let body = match style {
        Some(style) => format!(
            "<mstts:express-as style=\"{}\">{}</mstts:express-as>",
            escape_xml(style),
            prosody
        ),
        None => prosody,
    };

    format!(
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" \
         xmlns:mstts=\"https://www.w3.org/2001/mstts\" xml:lang=\"{}\">\
         <voice name=\"{}\">{}</voice></speak>",
        escape_xml(locale),
        escape_xml(voice),
        body
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl SynthesisEngine for AzureSpeechEngine {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioArtifact, SynthesisError> {
        let api_key = require_key(self.api_key.as_deref(), AZURE_ENGINE_ID)?;
        let voice = request
            .voice
            .as_deref()
            .map(str::trim)
            .unwrap_or(&self.descriptor.default_voice);

        let ssml = build_ssml(
            &self.locale,
            voice,
            request.style.as_deref(),
            request.speed,
            &request.text,
        );

        tracing::debug!(voice = %voice, output_format = %self.output_format, "Requesting Azure speech");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header(reqwest::header::USER_AGENT, "voiceturn")
            .body(ssml)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        audio_from_response(response, self.descriptor.output_format).await
    }
}
