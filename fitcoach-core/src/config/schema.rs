//! Configuration schema structures with serde support

use super::credentials::{
    CredentialSource, AIMLAPI_API_KEY, DEEPSEEK_API_KEY, TENCENT_SECRET_ID, TENCENT_SECRET_KEY,
};
use super::secrets::SecretString;
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// Supported schema version
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FitcoachConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Per-attempt HTTP timeout applied to every provider
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Provider settings; order in the file does not affect dispatch priority
    #[serde(default)]
    pub providers: Vec<ProviderSettings>,
}

/// Settings for one provider backend
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    #[serde(rename = "type")]
    pub kind: ProviderKind,

    /// API key for bearer-authenticated providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Secret ID for Tencent Cloud
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<SecretString>,

    /// Secret key for Tencent Cloud
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<SecretString>,

    /// Override of the provider endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl ProviderSettings {
    /// Empty settings for a kind; credentials must be filled in
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            secret_id: None,
            secret_key: None,
            base_url: None,
            model: None,
            temperature: None,
            max_tokens: None,
            enabled: true,
        }
    }

    /// Read this kind's credentials from a source
    pub fn from_credentials(kind: ProviderKind, source: &dyn CredentialSource) -> Self {
        let mut settings = Self::new(kind);
        match kind {
            ProviderKind::DeepSeek => settings.api_key = source.credential(DEEPSEEK_API_KEY),
            ProviderKind::AimlApi => settings.api_key = source.credential(AIMLAPI_API_KEY),
            ProviderKind::Hunyuan => {
                settings.secret_id = source.credential(TENCENT_SECRET_ID);
                settings.secret_key = source.credential(TENCENT_SECRET_KEY);
            }
        }
        settings
    }

    pub fn with_api_key(mut self, key: impl Into<SecretString>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_secret_pair(
        mut self,
        secret_id: impl Into<SecretString>,
        secret_key: impl Into<SecretString>,
    ) -> Self {
        self.secret_id = Some(secret_id.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Whether the credentials this kind requires are all present
    pub fn has_credentials(&self) -> bool {
        let present = |s: &Option<SecretString>| s.as_ref().is_some_and(|v| !v.is_empty());
        match self.kind {
            ProviderKind::DeepSeek | ProviderKind::AimlApi => present(&self.api_key),
            ProviderKind::Hunyuan => present(&self.secret_id) && present(&self.secret_key),
        }
    }

    /// Redacted form of the identifying credential, for logs
    pub fn credential_hint(&self) -> String {
        let identifying = match self.kind {
            ProviderKind::DeepSeek | ProviderKind::AimlApi => &self.api_key,
            ProviderKind::Hunyuan => &self.secret_id,
        };
        identifying
            .as_ref()
            .map(SecretString::partial_redact)
            .unwrap_or_else(|| "[EMPTY]".to_string())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(0.7)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(2000)
    }
}

impl FitcoachConfig {
    /// Configuration with every known provider, credentials read from `source`
    pub fn from_credentials(source: &dyn CredentialSource) -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            timeout_secs: default_timeout_secs(),
            providers: ProviderKind::PRIORITY
                .iter()
                .map(|kind| ProviderSettings::from_credentials(*kind, source))
                .collect(),
        }
    }

    /// Settings for a kind, if present
    pub fn settings_for(&self, kind: ProviderKind) -> Option<&ProviderSettings> {
        self.providers.iter().find(|p| p.kind == kind)
    }

    /// Fill credentials left empty in the file from `source`
    pub fn merge_credentials(&mut self, source: &dyn CredentialSource) {
        for settings in &mut self.providers {
            let from_source = ProviderSettings::from_credentials(settings.kind, source);
            let missing = |s: &Option<SecretString>| s.as_ref().is_none_or(|v| v.is_empty());
            if missing(&settings.api_key) {
                settings.api_key = from_source.api_key;
            }
            if missing(&settings.secret_id) {
                settings.secret_id = from_source.secret_id;
            }
            if missing(&settings.secret_key) {
                settings.secret_key = from_source.secret_key;
            }
        }
    }
}

impl Default for FitcoachConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            timeout_secs: default_timeout_secs(),
            providers: Vec::new(),
        }
    }
}
