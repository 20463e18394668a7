//! Configuration for the LLM dispatcher
//!
//! Provider credentials come from a [`CredentialSource`] (the process
//! environment by default) or from a YAML/JSON file with `${VAR}`
//! interpolation.

mod credentials;
mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use credentials::{
    CredentialSource, EnvCredentials, StaticCredentials, AIMLAPI_API_KEY, DEEPSEEK_API_KEY,
    TENCENT_SECRET_ID, TENCENT_SECRET_KEY,
};
pub use env::{interpolate_env_vars, interpolate_with};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{FitcoachConfig, ProviderSettings, CONFIG_VERSION};
pub use secrets::SecretString;
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<FitcoachConfig> {
    let path = path.as_ref();
    let content = read(path)?;

    // Interpolate environment variables before parsing
    let interpolated = env::interpolate_env_vars(&content)?;

    let config: FitcoachConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<FitcoachConfig> {
    let path = path.as_ref();
    let content = read(path)?;

    let interpolated = env::interpolate_env_vars(&content)?;

    let config: FitcoachConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load a configuration, picking the format from the file extension
pub fn load_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<FitcoachConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_from_json(path),
        _ => load_from_yaml(path),
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
