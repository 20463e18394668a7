//! Provider adapter trait and provider kinds
//!
//! Defines the capability every text-generation backend exposes to the
//! dispatcher. The dispatcher never sees provider request/response schemas.

use crate::protocol::{ConversationMessage, GenerationResult};
use crate::providers::error::ProviderResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Core provider trait that all text-generation backends implement
#[async_trait]
pub trait Provider: Send + Sync {
    /// Display name, also reported as `GenerationResult::provider`
    fn name(&self) -> &str;

    /// Whether the provider currently holds the credentials it needs
    fn is_available(&self) -> bool;

    /// Generate text for the conversation; one attempt, no retries
    async fn call(&self, conversation: &[ConversationMessage]) -> ProviderResult<GenerationResult>;
}

/// Known provider backends, declared in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    DeepSeek,
    Hunyuan,
    #[serde(rename = "aimlapi")]
    AimlApi,
}

impl ProviderKind {
    /// Fixed preference order used when building a registry from credentials
    pub const PRIORITY: [ProviderKind; 3] = [
        ProviderKind::DeepSeek,
        ProviderKind::Hunyuan,
        ProviderKind::AimlApi,
    ];

    /// Name reported in results and logs
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::Hunyuan => "Tencent Hunyuan",
            ProviderKind::AimlApi => "AIMLAPI",
        }
    }

    /// Identifier used in configuration files
    pub fn config_key(&self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Hunyuan => "hunyuan",
            ProviderKind::AimlApi => "aimlapi",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
            ProviderKind::Hunyuan => "https://hunyuan.tencentcloudapi.com",
            ProviderKind::AimlApi => "https://api.aimlapi.com/v1/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "deepseek-chat",
            ProviderKind::Hunyuan => "hunyuan-lite",
            ProviderKind::AimlApi => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
