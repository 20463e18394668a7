//! Credential sources
//!
//! The registry only needs to know which named credentials are present. The
//! source is injected so tests and embedders never touch the process
//! environment.

use super::secrets::SecretString;
use std::collections::HashMap;
use std::env;

pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";
pub const TENCENT_SECRET_ID: &str = "TENCENT_SECRET_ID";
pub const TENCENT_SECRET_KEY: &str = "TENCENT_SECRET_KEY";
pub const AIMLAPI_API_KEY: &str = "AIMLAPI_API_KEY";

/// Lookup of named credentials
pub trait CredentialSource: Send + Sync {
    /// The credential's value, or `None` when unset or empty
    fn credential(&self, name: &str) -> Option<SecretString>;

    /// Whether the credential is present
    fn has(&self, name: &str) -> bool {
        self.credential(name).is_some()
    }
}

/// Reads credentials from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credential(&self, name: &str) -> Option<SecretString> {
        env::var(name)
            .ok()
            .map(SecretString::new)
            .filter(|s| !s.is_empty())
    }
}

/// In-memory credentials
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<String, SecretString>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SecretString>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, name: &str) -> Option<SecretString> {
        self.values.get(name).filter(|s| !s.is_empty()).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticCredentials
where
    K: Into<String>,
    V: Into<SecretString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
