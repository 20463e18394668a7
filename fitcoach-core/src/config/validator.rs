//! Configuration validation

use super::error::{ValidationError, ValidationErrorKind};
use super::schema::{FitcoachConfig, CONFIG_VERSION};
use std::collections::HashSet;
use url::Url;

/// Validates a loaded configuration before any provider is built
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &FitcoachConfig) -> Result<(), ValidationError> {
        self.validate_version(config)?;

        if config.timeout_secs == 0 {
            return Err(ValidationError::out_of_range(
                "timeout_secs",
                "timeout must be at least one second",
            ));
        }

        let mut seen = HashSet::new();
        for (idx, provider) in config.providers.iter().enumerate() {
            let path = format!("providers[{}]", idx);

            if !seen.insert(provider.kind) {
                return Err(ValidationError::new(
                    format!("{}.type", path),
                    ValidationErrorKind::DuplicateValue {
                        value: provider.kind.config_key().to_string(),
                    },
                ));
            }

            if let Some(base_url) = &provider.base_url {
                Self::validate_url(&format!("{}.base_url", path), base_url)?;
            }

            if let Some(temperature) = provider.temperature {
                if !(0.0..=2.0).contains(&temperature) {
                    return Err(ValidationError::out_of_range(
                        format!("{}.temperature", path),
                        format!("temperature must be between 0.0 and 2.0, got {}", temperature),
                    ));
                }
            }

            if provider.max_tokens == Some(0) {
                return Err(ValidationError::out_of_range(
                    format!("{}.max_tokens", path),
                    "max_tokens must be greater than zero",
                ));
            }

            if provider.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
                return Err(ValidationError::invalid_value(
                    format!("{}.model", path),
                    "a model identifier",
                    "empty string",
                ));
            }
        }

        Ok(())
    }

    fn validate_version(&self, config: &FitcoachConfig) -> Result<(), ValidationError> {
        if config.version != CONFIG_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::InvalidVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: config.version.clone(),
                },
            ));
        }
        Ok(())
    }

    fn validate_url(path: &str, value: &str) -> Result<(), ValidationError> {
        let url = Url::parse(value).map_err(|e| {
            ValidationError::new(
                path,
                ValidationErrorKind::InvalidUrl {
                    message: format!("'{}': {}", value, e),
                },
            )
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ValidationError::new(
                path,
                ValidationErrorKind::InvalidUrl {
                    message: format!("unsupported scheme '{}'", scheme),
                },
            )),
        }
    }
}
