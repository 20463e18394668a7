//! Chat-completions provider for OpenAI-compatible APIs
//!
//! DeepSeek and AIMLAPI both speak this wire format; they differ only in
//! endpoint, default model and credential name.

use crate::config::{ProviderSettings, SecretString};
use crate::http::{self, ClientOptions, REQUEST_ID_HEADER};
use crate::protocol::{ConversationMessage, GenerationResult};
use crate::providers::adapter::{Provider, ProviderKind};
use crate::providers::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Provider for any endpoint implementing `POST /chat/completions`
pub struct OpenAICompatibleProvider {
    name: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_key: SecretString,
    client: Client,
}

impl OpenAICompatibleProvider {
    /// Create a provider with explicit endpoint and model
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<SecretString>,
        options: ClientOptions,
    ) -> ProviderResult<Self> {
        Ok(Self {
            name: name.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: api_key.into(),
            client: http::build_client(options)?,
        })
    }

    /// DeepSeek preset
    pub fn deepseek(api_key: impl Into<SecretString>) -> ProviderResult<Self> {
        Self::from_settings(
            &ProviderSettings::new(ProviderKind::DeepSeek).with_api_key(api_key),
            ClientOptions::default(),
        )
    }

    /// AIMLAPI preset
    pub fn aimlapi(api_key: impl Into<SecretString>) -> ProviderResult<Self> {
        Self::from_settings(
            &ProviderSettings::new(ProviderKind::AimlApi).with_api_key(api_key),
            ClientOptions::default(),
        )
    }

    /// Build from configuration; the kind supplies name and defaults
    pub fn from_settings(settings: &ProviderSettings, options: ClientOptions) -> ProviderResult<Self> {
        let api_key = settings.api_key.clone().unwrap_or_default();
        Ok(Self::new(
            settings.kind.display_name(),
            settings.base_url(),
            settings.model(),
            api_key,
            options,
        )?
        .with_sampling(settings.temperature(), settings.max_tokens()))
    }

    /// Override sampling parameters
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Provider for OpenAICompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn call(&self, conversation: &[ConversationMessage]) -> ProviderResult<GenerationResult> {
        let request_id = http::new_request_id();
        debug!(
            "POST {} for {} [request_id: {}]",
            self.endpoint, self.name, request_id
        );

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: conversation,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.ok();
            warn!(
                "{} returned status {} [request_id: {}]",
                self.name, status, request_id
            );
            return Err(http::map_http_error(status, Some(&headers), body, request_id));
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        let model = parsed
            .model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.model.clone());

        Ok(GenerationResult::new(content, self.name.clone(), model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![
            ConversationMessage::system("You are a coach"),
            ConversationMessage::user("Plan"),
        ];
        let body = ChatCompletionRequest {
            model: "deepseek-chat",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 2000,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Plan");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn test_presets() {
        let deepseek = OpenAICompatibleProvider::deepseek("sk-1").unwrap();
        assert_eq!(deepseek.name(), "DeepSeek");
        assert_eq!(deepseek.model(), "deepseek-chat");
        assert!(deepseek.is_available());

        let aimlapi = OpenAICompatibleProvider::aimlapi("").unwrap();
        assert_eq!(aimlapi.name(), "AIMLAPI");
        assert_eq!(aimlapi.endpoint(), "https://api.aimlapi.com/v1/chat/completions");
        assert!(!aimlapi.is_available());
    }
}
