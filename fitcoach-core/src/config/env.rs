//! Environment variable interpolation for configuration
//!
//! Supports `${VAR}` (the variable must be set) and `${VAR:-default}` (falls
//! back to `default`, which may be empty).
//!
//! Substitution runs on the raw file text before it is parsed, so a value is
//! pasted in verbatim. Quote any placeholder whose value may contain `#`,
//! `: ` or quotes, e.g. `api_key: "${DEEPSEEK_API_KEY}"`. Lines whose first
//! non-blank character is `#` are YAML comments and are left untouched.

use super::error::ConfigError;
use regex::{Captures, Regex};
use std::env;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}").expect("env var pattern is valid")
});

/// Interpolate process environment variables in a configuration string
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    interpolate_with(content, |name| env::var(name).ok())
}

/// Interpolate variables using an arbitrary lookup
pub fn interpolate_with<F>(content: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing: Option<String> = None;
    let mut result = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let replaced = ENV_VAR_PATTERN.replace_all(line, |cap: &Captures<'_>| {
            let var_name = &cap[1];
            match (lookup(var_name), cap.get(2)) {
                (Some(value), _) => value,
                (None, Some(default)) => default.as_str().to_string(),
                (None, None) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });
        result.push_str(&replaced);
    }

    // Report the first missing variable
    if let Some(var) = missing {
        return Err(ConfigError::EnvVarNotFound { var });
    }

    Ok(result)
}
