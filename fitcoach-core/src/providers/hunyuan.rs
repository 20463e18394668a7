//! Tencent Hunyuan provider
//!
//! Talks to the Tencent Cloud `ChatCompletions` action (API version
//! 2023-09-01). Payloads use Tencent's PascalCase field names and errors come
//! back inside `Response.Error` with a 200 status.

use crate::config::{ProviderSettings, SecretString};
use crate::http::{self, ClientOptions, REQUEST_ID_HEADER};
use crate::protocol::{ConversationMessage, GenerationResult};
use crate::providers::adapter::{Provider, ProviderKind};
use crate::providers::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ACTION: &str = "ChatCompletions";
const API_VERSION: &str = "2023-09-01";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanRequest<'a> {
    model: &'a str,
    messages: Vec<HunyuanMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanEnvelope {
    response: HunyuanResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanResponse {
    #[serde(default)]
    choices: Vec<HunyuanChoice>,
    #[serde(default)]
    error: Option<HunyuanError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanChoice {
    message: HunyuanReply,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HunyuanError {
    code: String,
    message: String,
}

/// Provider for Tencent Hunyuan; needs both a secret ID and a secret key
pub struct HunyuanProvider {
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    secret_id: SecretString,
    secret_key: SecretString,
    client: Client,
}

impl HunyuanProvider {
    pub fn new(
        secret_id: impl Into<SecretString>,
        secret_key: impl Into<SecretString>,
    ) -> ProviderResult<Self> {
        Self::from_settings(
            &ProviderSettings::new(ProviderKind::Hunyuan).with_secret_pair(secret_id, secret_key),
            ClientOptions::default(),
        )
    }

    pub fn from_settings(settings: &ProviderSettings, options: ClientOptions) -> ProviderResult<Self> {
        Ok(Self {
            endpoint: settings.base_url().to_string(),
            model: settings.model().to_string(),
            temperature: settings.temperature(),
            max_tokens: settings.max_tokens(),
            secret_id: settings.secret_id.clone().unwrap_or_default(),
            secret_key: settings.secret_key.clone().unwrap_or_default(),
            client: http::build_client(options)?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_wire(conversation: &[ConversationMessage]) -> Vec<HunyuanMessage<'_>> {
        conversation
            .iter()
            .map(|m| HunyuanMessage {
                role: m.role().as_str(),
                content: m.content(),
            })
            .collect()
    }
}

#[async_trait]
impl Provider for HunyuanProvider {
    fn name(&self) -> &str {
        ProviderKind::Hunyuan.display_name()
    }

    fn is_available(&self) -> bool {
        !self.secret_id.is_empty() && !self.secret_key.is_empty()
    }

    async fn call(&self, conversation: &[ConversationMessage]) -> ProviderResult<GenerationResult> {
        let request_id = http::new_request_id();
        debug!("POST {} for {} [request_id: {}]", self.endpoint, self.name(), request_id);

        let body = HunyuanRequest {
            model: &self.model,
            messages: Self::to_wire(conversation),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        // TODO: replace the bare secret key with a TC3-HMAC-SHA256 signed Authorization header
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", self.secret_key.expose_secret())
            .header("X-TC-Action", ACTION)
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Timestamp", Utc::now().timestamp().to_string())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.ok();
            warn!("{} returned status {} [request_id: {}]", self.name(), status, request_id);
            return Err(http::map_http_error(status, Some(&headers), body, request_id));
        }

        let text = response.text().await?;
        let envelope: HunyuanEnvelope = serde_json::from_str(&text)?;

        if let Some(error) = envelope.response.error {
            return Err(ProviderError::Api {
                code: error.code,
                message: format!("{} [request_id: {}]", error.message, request_id),
            });
        }

        let content = envelope
            .response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(GenerationResult::new(content, self.name(), self.model.clone()))
    }
}
