//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the parsed config and one pooled HTTP client for proxying.

use std::sync::Arc;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build the proxy client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .connect_timeout(config.proxy_connect_timeout)
            .build()?;
        Ok(Self { client, config: Arc::new(config) })
    }
}
