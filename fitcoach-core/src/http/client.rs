//! HTTP client construction using reqwest

use crate::providers::error::ProviderError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Default user agent
const USER_AGENT: &str = concat!("fitcoach/", env!("CARGO_PKG_VERSION"));

/// Connection and timeout settings for one provider's client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
    /// Whole-request timeout for a single attempt
    pub request_timeout: Duration,
    pub max_idle_per_host: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_idle_per_host: 10,
        }
    }
}

impl ClientOptions {
    /// Options with the given per-attempt timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            request_timeout: timeout,
            connect_timeout: timeout.min(Duration::from_secs(10)),
            ..Default::default()
        }
    }
}

/// Build a pooled reqwest client.
///
/// `reqwest::Client` is internally reference counted, so each provider owns
/// one and clones are cheap.
pub fn build_client(options: ClientOptions) -> Result<Client, ProviderError> {
    ClientBuilder::new()
        .pool_max_idle_per_host(options.max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(90))
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .user_agent(USER_AGENT)
        .gzip(true)
        .build()
        .map_err(|e| ProviderError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(build_client(ClientOptions::default()).is_ok());
    }

    #[test]
    fn test_short_timeout_caps_connect_timeout() {
        let options = ClientOptions::with_timeout(Duration::from_secs(3));
        assert_eq!(options.request_timeout, Duration::from_secs(3));
        assert_eq!(options.connect_timeout, Duration::from_secs(3));

        let options = ClientOptions::with_timeout(Duration::from_secs(60));
        assert_eq!(options.connect_timeout, Duration::from_secs(10));
    }
}
