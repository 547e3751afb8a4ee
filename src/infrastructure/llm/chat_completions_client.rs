use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::LlmSettings;

/// Non-streaming client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionsClient {
    client: Client,
    provider: String,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    api_version: Option<String>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatCompletionsClient {
    fn build_messages(system_prompt: &str, user_prompt: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: "system".to_string(),
                content: Some(system_prompt.to_string()),
            },
            ChatMessage {
                role: "user".to_string(),
                content: Some(user_prompt.to_string()),
            },
        ]
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider.as_str() {
            "azure" => request.header("api-key", &self.api_key),
            _ if self.api_key.is_empty() => request,
            _ => request.header("Authorization", format!("Bearer {}", self.api_key)),
        }
    }

    fn endpoint(&self) -> String {
        match &self.api_version {
            Some(version) => format!(
                "{}/chat/completions?api-version={}",
                self.base_url, version
            ),
            None => format!("{}/chat/completions", self.base_url),
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        // Azure routes by deployment in the URL and ignores the model field.
        let model = (self.provider != "azure").then_some(self.model.as_str());
        let request_body = ChatCompletionRequest {
            model,
            messages: Self::build_messages(system_prompt, user_prompt),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let request = self.client.post(self.endpoint()).json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::Rejected { status, body });
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}

pub fn create_chat_completions_client(
    settings: &LlmSettings,
) -> Result<ChatCompletionsClient, LlmClientError> {
    let api_key = settings
        .api_key
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let (base_url, api_version) = match settings.provider.as_str() {
        "openai" => {
            if api_key.is_empty() && settings.base_url.is_none() {
                return Err(LlmClientError::InvalidResponse(
                    "api_key required for openai provider".to_string(),
                ));
            }
            let base = settings
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
            (base, None)
        }
        "ollama" => {
            let base = settings
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());
            (base, None)
        }
        "azure" => {
            let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                LlmClientError::InvalidResponse(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            if api_key.is_empty() {
                return Err(LlmClientError::InvalidResponse(
                    "api_key required for azure provider".to_string(),
                ));
            }
            let base = format!(
                "{}/openai/deployments/{}",
                endpoint.trim_end_matches('/'),
                settings.chat_model
            );
            (base, Some(settings.azure_api_version.clone()))
        }
        _ => {
            return Err(LlmClientError::InvalidResponse(format!(
                "unknown provider: {}",
                settings.provider
            )));
        }
    };

    Ok(ChatCompletionsClient {
        client: Client::new(),
        provider: settings.provider.clone(),
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key,
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        api_version,
    })
}
