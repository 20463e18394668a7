//! Provider error types and handling

use thiserror::Error;

/// Result type for a single provider attempt
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors from one attempt against one provider.
///
/// The dispatcher treats every variant the same way: record it and move on to
/// the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// Server-side failure (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Request rejected by the provider (4xx other than auth and rate limit)
    #[error("Invalid request ({status}): {message}")]
    InvalidRequest { status: u16, message: String },

    /// Provider returned a structured error payload
    #[error("Provider error: {code}: {message}")]
    Api { code: String, message: String },

    /// Response body could not be parsed
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Response parsed but carried no generated text
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// Provider could not be constructed or is misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_connect() {
            ProviderError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

/// Terminal outcome of a dispatcher call that produced no result
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The caller passed a conversation with no messages
    #[error("Conversation must contain at least one message")]
    EmptyConversation,

    /// Every configured provider was skipped or failed
    #[error("{}", exhausted_message(*attempted, *configured))]
    Exhausted {
        /// Providers actually attempted (skipped ones excluded)
        attempted: usize,
        /// Providers configured in the registry
        configured: usize,
        /// Last recorded provider failure, absent when every provider was skipped
        #[source]
        source: Option<ProviderError>,
    },

    /// The caller cancelled the call while an attempt was in flight
    #[error("LLM call cancelled")]
    Cancelled,
}

fn exhausted_message(attempted: usize, configured: usize) -> String {
    if attempted == 0 {
        format!("No available LLM provider among {configured} configured")
    } else {
        format!("All {attempted} of {configured} LLM providers failed")
    }
}

impl DispatchError {
    /// The last provider error recorded before exhaustion
    pub fn last_provider_error(&self) -> Option<&ProviderError> {
        match self {
            DispatchError::Exhausted { source, .. } => source.as_ref(),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, DispatchError::Exhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_exhausted_wraps_last_error() {
        let err = DispatchError::Exhausted {
            attempted: 2,
            configured: 3,
            source: Some(ProviderError::EmptyResponse),
        };

        assert!(err.is_exhausted());
        assert_eq!(err.to_string(), "All 2 of 3 LLM providers failed");
        assert!(matches!(
            err.last_provider_error(),
            Some(ProviderError::EmptyResponse)
        ));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_exhausted_without_attempts_has_no_source() {
        let err = DispatchError::Exhausted {
            attempted: 0,
            configured: 1,
            source: None,
        };
        assert!(err.source().is_none());
        assert!(err.last_provider_error().is_none());
        assert_eq!(
            err.to_string(),
            "No available LLM provider among 1 configured"
        );
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ProviderError = json_err.into();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
