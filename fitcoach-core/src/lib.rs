//! FitCoach Core Library
//!
//! Multi-provider LLM dispatch for the FitCoach backend. A
//! [`ProviderRegistry`] holds the configured providers in a fixed priority
//! order and answers each call from the first one that succeeds; with no
//! provider configured it returns a simulated response instead.
//!
//! ```no_run
//! use fitcoach_core::{ConversationMessage, ProviderRegistry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProviderRegistry::from_env()?;
//! let reply = registry
//!     .call(&[ConversationMessage::user("Suggest a warm-up routine")])
//!     .await?;
//! println!("{} ({}): {}", reply.provider(), reply.model(), reply.content());
//! # Ok(())
//! # }
//! ```

pub mod coach;
pub mod config;
pub mod http;
pub mod protocol;
pub mod providers;

pub use config::{ConfigError, CredentialSource, EnvCredentials, FitcoachConfig, StaticCredentials};
pub use protocol::{Conversation, ConversationMessage, GenerationResult, MessageRole};
pub use providers::{DispatchError, Provider, ProviderError, ProviderKind, ProviderRegistry};

/// Returns the version of the FitCoach Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
