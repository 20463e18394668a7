//! Provider registry and priority-ordered dispatch
//!
//! The registry holds providers in a fixed preference order and serves each
//! call from the first provider that succeeds. Failed providers are logged and
//! skipped; a single failure is never surfaced on its own. When no provider is
//! configured at all, calls return a simulated response so plan endpoints keep
//! working without credentials.

use crate::config::{
    ConfigError, ConfigResult, CredentialSource, EnvCredentials, FitcoachConfig, ProviderSettings,
};
use crate::http::ClientOptions;
use crate::protocol::{ConversationMessage, GenerationResult};
use crate::providers::adapter::{Provider, ProviderKind};
use crate::providers::error::{DispatchError, ProviderError};
use crate::providers::hunyuan::HunyuanProvider;
use crate::providers::openai_compatible::OpenAICompatibleProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::{self, Future};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn, Instrument, Span};

/// Provider name reported by the simulated response
pub const MOCK_PROVIDER: &str = "Mock";

/// Model name reported by the simulated response
pub const MOCK_MODEL: &str = "mock-model";

/// Placeholder text returned when no provider is configured
pub const MOCK_CONTENT: &str =
    "This is a simulated AI response. Configure an LLM API key to enable real AI features.";

/// Snapshot of provider availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStatus {
    /// Providers whose credentials are currently usable, in priority order
    pub available_providers: Vec<String>,
    /// Every configured provider with its availability, in priority order
    pub provider_status: Vec<(String, bool)>,
    pub total_providers: usize,
}

/// Ordered set of providers with first-success dispatch.
///
/// The list is fixed at construction; `call` only reads it, so a registry can
/// be shared behind an `Arc` by any number of concurrent callers.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
    span: Span,
}

impl ProviderRegistry {
    /// Create a registry from providers already in priority order
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            span: Span::none(),
        }
    }

    /// A registry with no providers; every call is answered by the mock
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_credentials(&EnvCredentials)
    }

    /// Build from a credential source using default endpoints and models
    pub fn from_credentials(source: &dyn CredentialSource) -> ConfigResult<Self> {
        Self::from_config(&FitcoachConfig::from_credentials(source))
    }

    /// Build from configuration.
    ///
    /// Providers are added in [`ProviderKind::PRIORITY`] order regardless of
    /// their order in the configuration. Disabled providers and providers
    /// missing credentials are left out.
    pub fn from_config(config: &FitcoachConfig) -> ConfigResult<Self> {
        let options = ClientOptions::with_timeout(Duration::from_secs(config.timeout_secs));
        let mut providers: Vec<Box<dyn Provider>> = Vec::new();

        for kind in ProviderKind::PRIORITY {
            let Some(settings) = config.settings_for(kind) else {
                continue;
            };
            if !settings.enabled {
                debug!("{} is disabled in configuration", kind);
                continue;
            }
            if !settings.has_credentials() {
                debug!("{} has no credentials configured", kind);
                continue;
            }

            let provider = build_provider(settings, options).map_err(|e| {
                ConfigError::ProviderSetup {
                    provider: kind.display_name().to_string(),
                    message: e.to_string(),
                }
            })?;
            info!(
                "Loaded {} provider (model: {}, key: {})",
                kind,
                settings.model(),
                settings.credential_hint()
            );
            providers.push(provider);
        }

        if providers.is_empty() {
            warn!("No LLM provider configured; responses will be simulated");
        }

        Ok(Self::new(providers))
    }

    /// Attach the span every call is recorded under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Configured provider names in priority order
    pub fn providers(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Names of providers that are available right now
    pub fn available_providers(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            available_providers: self.available_providers(),
            provider_status: self
                .providers
                .iter()
                .map(|p| (p.name().to_string(), p.is_available()))
                .collect(),
            total_providers: self.providers.len(),
        }
    }

    /// True when calls are answered by the simulated response
    pub fn is_mock(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Generate text, trying providers in priority order until one succeeds
    pub async fn call(
        &self,
        conversation: &[ConversationMessage],
    ) -> Result<GenerationResult, DispatchError> {
        self.call_with_cancel(conversation, future::pending()).await
    }

    /// Like [`call`](Self::call), abandoning the attempt in flight as soon as
    /// `cancel` completes. No further providers are tried after cancellation.
    pub async fn call_with_cancel<C>(
        &self,
        conversation: &[ConversationMessage],
        cancel: C,
    ) -> Result<GenerationResult, DispatchError>
    where
        C: Future<Output = ()>,
    {
        self.dispatch(conversation, cancel)
            .instrument(self.span.clone())
            .await
    }

    /// Like [`call`](Self::call), bounded by an overall deadline
    pub async fn call_with_deadline(
        &self,
        conversation: &[ConversationMessage],
        deadline: Instant,
    ) -> Result<GenerationResult, DispatchError> {
        self.call_with_cancel(conversation, tokio::time::sleep_until(deadline))
            .await
    }

    async fn dispatch<C>(
        &self,
        conversation: &[ConversationMessage],
        cancel: C,
    ) -> Result<GenerationResult, DispatchError>
    where
        C: Future<Output = ()>,
    {
        if conversation.is_empty() {
            return Err(DispatchError::EmptyConversation);
        }

        if self.providers.is_empty() {
            return Ok(mock_response());
        }

        tokio::pin!(cancel);

        let mut last_error: Option<ProviderError> = None;
        let mut attempted = 0;

        for provider in &self.providers {
            if !provider.is_available() {
                debug!("Skipping {}: not available", provider.name());
                continue;
            }

            attempted += 1;
            info!("Trying {}", provider.name());

            let outcome = tokio::select! {
                biased;
                _ = &mut cancel => {
                    warn!("Call cancelled while waiting on {}", provider.name());
                    return Err(DispatchError::Cancelled);
                }
                outcome = provider.call(conversation) => outcome,
            };

            match outcome {
                Ok(result) => {
                    info!("{} call succeeded", provider.name());
                    return Ok(result);
                }
                Err(e) => {
                    warn!("{} call failed: {}", provider.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(DispatchError::Exhausted {
            attempted,
            configured: self.providers.len(),
            source: last_error,
        })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}

fn build_provider(
    settings: &ProviderSettings,
    options: ClientOptions,
) -> Result<Box<dyn Provider>, ProviderError> {
    Ok(match settings.kind {
        ProviderKind::DeepSeek | ProviderKind::AimlApi => {
            Box::new(OpenAICompatibleProvider::from_settings(settings, options)?)
        }
        ProviderKind::Hunyuan => Box::new(HunyuanProvider::from_settings(settings, options)?),
    })
}

fn mock_response() -> GenerationResult {
    GenerationResult::new(MOCK_CONTENT, MOCK_PROVIDER, MOCK_MODEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StaticCredentials, AIMLAPI_API_KEY, DEEPSEEK_API_KEY, TENCENT_SECRET_ID, TENCENT_SECRET_KEY};

    #[test]
    fn test_from_credentials_follows_priority() {
        let creds = StaticCredentials::new()
            .with(AIMLAPI_API_KEY, "aiml-key")
            .with(TENCENT_SECRET_ID, "id")
            .with(TENCENT_SECRET_KEY, "key")
            .with(DEEPSEEK_API_KEY, "sk-deepseek");

        let registry = ProviderRegistry::from_credentials(&creds).unwrap();
        assert_eq!(
            registry.providers(),
            vec!["DeepSeek", "Tencent Hunyuan", "AIMLAPI"]
        );
        assert!(!registry.is_mock());
    }

    #[test]
    fn test_hunyuan_skipped_without_secret_key() {
        let creds = StaticCredentials::new()
            .with(TENCENT_SECRET_ID, "id")
            .with(AIMLAPI_API_KEY, "aiml-key");

        let registry = ProviderRegistry::from_credentials(&creds).unwrap();
        assert_eq!(registry.providers(), vec!["AIMLAPI"]);
    }

    #[test]
    fn test_no_credentials_builds_empty_registry() {
        let registry = ProviderRegistry::from_credentials(&StaticCredentials::new()).unwrap();
        assert!(registry.is_mock());
        assert_eq!(registry.status().total_providers, 0);
    }

    #[test]
    fn test_disabled_provider_left_out() {
        let mut deepseek = ProviderSettings::new(ProviderKind::DeepSeek).with_api_key("sk-1");
        deepseek.enabled = false;
        let config = FitcoachConfig {
            providers: vec![
                deepseek,
                ProviderSettings::new(ProviderKind::AimlApi).with_api_key("k"),
            ],
            ..Default::default()
        };

        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert_eq!(registry.providers(), vec!["AIMLAPI"]);
    }

    #[test]
    fn test_file_order_does_not_change_priority() {
        let config = FitcoachConfig {
            providers: vec![
                ProviderSettings::new(ProviderKind::AimlApi).with_api_key("k"),
                ProviderSettings::new(ProviderKind::DeepSeek).with_api_key("sk-1"),
            ],
            ..Default::default()
        };

        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert_eq!(registry.providers(), vec!["DeepSeek", "AIMLAPI"]);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_log_shows_redacted_key_only() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let creds = StaticCredentials::new().with(DEEPSEEK_API_KEY, "sk-1234567890abcdef");
        ProviderRegistry::from_credentials(&creds).unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Loaded DeepSeek provider"));
        assert!(output.contains("key: sk-...cdef"));
        assert!(!output.contains("sk-1234567890abcdef"));
    }

    #[tokio::test]
    async fn test_empty_conversation_rejected() {
        let err = ProviderRegistry::empty().call(&[]).await.unwrap_err();
        assert!(matches!(err, DispatchError::EmptyConversation));
    }
}
