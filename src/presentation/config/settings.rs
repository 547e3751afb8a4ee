use std::collections::HashMap;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{
    DEFAULT_FALLBACK_REPLY, DEFAULT_SYSTEM_PROMPT, DEFAULT_TRANSCRIPT_PLACEHOLDER,
};

use super::Environment;

pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub pipeline: PipelineSettings,
    pub artifacts: ArtifactSettings,
    pub normalizer: NormalizerSettings,
    pub transcription: TranscriptionSettings,
    pub llm: LlmSettings,
    pub synthesis: SynthesisSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}.toml` and `APP__*`
    /// environment variables, later sources winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("normalizer.converters"),
            )
            .build()?;

        configuration.try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: 25,
        }
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Language the assistant answers and speaks in.
    pub language: String,
    pub audio_route: String,
    /// Parent for per-turn scratch directories; the system temp dir when unset.
    pub scratch_dir: Option<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            audio_route: "/audio".to_string(),
            scratch_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactProviderSetting {
    #[default]
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    pub provider: ArtifactProviderSetting,
    pub local_path: String,
    pub retention_secs: u64,
    pub sweep_interval_secs: u64,
    pub reclaim_on_read: bool,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            provider: ArtifactProviderSetting::Local,
            local_path: "data/artifacts".to_string(),
            retention_secs: 600,
            sweep_interval_secs: 60,
            reclaim_on_read: false,
        }
    }
}

impl ArtifactSettings {
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizerSettings {
    /// Tried in order; unknown names are ignored with a warning.
    pub converters: Vec<String>,
    pub timeout_secs: u64,
    pub ffmpeg_path: String,
    pub afconvert_path: String,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            converters: vec![
                "ffmpeg".to_string(),
                "afconvert".to_string(),
                "symphonia".to_string(),
            ],
            timeout_secs: 30,
            ffmpeg_path: "ffmpeg".to_string(),
            afconvert_path: "afconvert".to_string(),
        }
    }
}

impl NormalizerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
    pub timeout_secs: u64,
    /// Zero disables retrying a failed initialization.
    pub retry_cooldown_secs: u64,
    pub placeholder: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderSetting::OpenAi,
            api_key: None,
            base_url: None,
            model: "whisper-1".to_string(),
            azure_endpoint: None,
            azure_deployment: None,
            azure_api_version: "2024-06-01".to_string(),
            timeout_secs: 30,
            retry_cooldown_secs: 300,
            placeholder: DEFAULT_TRANSCRIPT_PLACEHOLDER.to_string(),
        }
    }
}

impl TranscriptionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_cooldown(&self) -> Option<Duration> {
        cooldown(self.retry_cooldown_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// `openai`, `azure` or `ollama`.
    pub provider: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_api_version: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub retry_cooldown_secs: u64,
    pub system_prompt: String,
    pub fallback_reply: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            base_url: None,
            azure_endpoint: None,
            azure_api_version: "2024-06-01".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            max_tokens: 256,
            temperature: 0.7,
            timeout_secs: 10,
            retry_cooldown_secs: 300,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_cooldown(&self) -> Option<Duration> {
        cooldown(self.retry_cooldown_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    pub default_engine: String,
    pub timeout_secs: u64,
    pub speed: f32,
    pub style: Option<String>,
    pub aliases: HashMap<String, String>,
    pub openai: OpenAiSpeechSettings,
    pub elevenlabs: ElevenLabsSettings,
    pub azure: AzureSpeechSettings,
    pub espeak: EspeakSettings,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            default_engine: "openai".to_string(),
            timeout_secs: 30,
            speed: 1.0,
            style: None,
            aliases: HashMap::from([
                ("tts".to_string(), "openai".to_string()),
                ("local".to_string(), "espeak".to_string()),
            ]),
            openai: OpenAiSpeechSettings::default(),
            elevenlabs: ElevenLabsSettings::default(),
            azure: AzureSpeechSettings::default(),
            espeak: EspeakSettings::default(),
        }
    }
}

impl SynthesisSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiSpeechSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub voices: Vec<String>,
    /// One of `wav`, `mp3`, `opus`, `flac`, `aac`.
    pub response_format: String,
}

impl Default for OpenAiSpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            voices: ["alloy", "echo", "fable", "onyx", "nova", "shimmer"]
                .into_iter()
                .map(String::from)
                .collect(),
            response_format: "wav".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElevenLabsSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_id: String,
    pub voice_id: String,
    pub output_format: String,
    pub language_code: Option<String>,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
}

impl Default for ElevenLabsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            output_format: "mp3_44100_128".to_string(),
            language_code: None,
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AzureSpeechSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub region: String,
    /// Overrides the regional endpoint, e.g. for a private deployment.
    pub endpoint: Option<String>,
    pub voice: String,
    /// BCP-47 tag placed on the SSML `speak` element.
    pub locale: String,
    pub output_format: String,
}

impl Default for AzureSpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            region: "westeurope".to_string(),
            endpoint: None,
            voice: "en-US-JennyNeural".to_string(),
            locale: "en-US".to_string(),
            output_format: "riff-16khz-16bit-mono-pcm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EspeakSettings {
    pub enabled: bool,
    pub binary: String,
    pub voice: String,
    pub words_per_minute: u32,
}

impl Default for EspeakSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            binary: "espeak-ng".to_string(),
            voice: "en".to_string(),
            words_per_minute: 175,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,voiceturn=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

fn cooldown(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
