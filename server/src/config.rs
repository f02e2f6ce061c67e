//! Host server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8787";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PROXY_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROXY_MAX_BODY_MB: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse as the expected type.
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    /// `BACKEND_URL` is not an absolute http(s) URL.
    #[error("BACKEND_URL must start with http:// or https://, got {0:?}")]
    BackendScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Retrieval backend base URL, without a trailing slash.
    pub backend_url: String,
    pub proxy_timeout: Duration,
    pub proxy_connect_timeout: Duration,
    /// Largest request body buffered and forwarded upstream.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Build the server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_URL`: default `http://localhost:8787`
    /// - `PROXY_TIMEOUT_SECS`: default 120
    /// - `PROXY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PROXY_MAX_BODY_MB`: default 64
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let backend_url = normalize_backend_url(
            &std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_owned()),
        )?;
        let proxy_timeout = Duration::from_secs(env_parse("PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS)?);
        let proxy_connect_timeout =
            Duration::from_secs(env_parse("PROXY_CONNECT_TIMEOUT_SECS", DEFAULT_PROXY_CONNECT_TIMEOUT_SECS)?);
        let max_body_bytes = env_parse("PROXY_MAX_BODY_MB", DEFAULT_PROXY_MAX_BODY_MB)?.saturating_mul(1024 * 1024);

        Ok(Self { port, backend_url, proxy_timeout, proxy_connect_timeout, max_body_bytes })
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if raw.trim().is_empty() => Ok(default),
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_BACKEND_URL.to_owned());
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::BackendScheme(trimmed.to_owned()));
    }
    Ok(trimmed.to_owned())
}
