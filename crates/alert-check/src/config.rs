use hyper::Uri;
use serde::Deserialize;
use thiserror::Error;

/// Base URL used when neither an explicit value nor `BYMA_API_URL` is given.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable holding the base URL of the BYMA API.
pub const API_URL_ENV: &str = "BYMA_API_URL";

const ENV_PREFIX: &str = "BYMA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Base URL of the API, without the `/api/v1/...` path.
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Load configuration from the process environment.
///
/// `BYMA_API_URL` maps onto `api_url`; when unset the literal default
/// `http://localhost:8000` is used.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    build_config(None)
}

/// Same as [`load_config`] but reads variables from `vars` instead of the
/// process environment.
pub fn load_config_from(vars: config::Map<String, String>) -> Result<AppConfig, ConfigError> {
    build_config(Some(vars))
}

fn build_config(vars: Option<config::Map<String, String>>) -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment};
    let cfg = Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .source(vars),
        )
        .build()?;

    Ok(cfg.try_deserialize()?)
}

/// Pick the base URL: an explicit value wins over the loaded configuration.
///
/// Trailing slashes are stripped and the result must be an absolute
/// `http`/`https` URL.
pub fn resolve_base_url(explicit: Option<&str>, config: &AppConfig) -> Result<String, ConfigError> {
    let raw = explicit.unwrap_or(&config.api_url);
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(ConfigError::Validation("base URL must not be empty".into()));
    }

    let uri: Uri = base
        .parse()
        .map_err(|e| ConfigError::Validation(format!("invalid base URL {base:?}: {e}")))?;
    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => {
            return Err(ConfigError::Validation(format!(
                "unsupported scheme {other:?} in base URL {base:?}"
            )));
        }
        None => {
            return Err(ConfigError::Validation(format!(
                "base URL {base:?} must include http:// or https://"
            )));
        }
    }
    if uri.authority().is_none() {
        return Err(ConfigError::Validation(format!(
            "base URL {base:?} has no host"
        )));
    }

    Ok(base.to_string())
}
