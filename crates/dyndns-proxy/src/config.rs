//! Environment configuration for the proxy
//!
//! All configuration is done via environment variables:
//!
//! - `PORT`: Listen port (default `8080`)
//! - `CLOUDFLARE_API_TOKEN`: API token (required)
//! - `CLOUDFLARE_ZONE_ID`: Zone holding the managed records (required)
//! - `BASIC_AUTH_USERNAME` / `BASIC_AUTH_PASSWORD`: Credentials for
//!   `/nic/update`; authentication is disabled unless both are set
//! - `LOG_LEVEL`: trace, debug, info, warn or error (default `info`)
//!
//! Empty variables are treated as unset.

use anyhow::{Context, Result};
use dyndns_core::config::DEFAULT_PORT;
use dyndns_core::{BasicAuth, ProviderConfig, ProxyConfig, ServerConfig};
use tracing::Level;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Proxy settings handed to the core
    pub proxy: ProxyConfig,
    /// Log verbosity
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number. Got: {}", port))?,
            None => DEFAULT_PORT,
        };

        let auth = BasicAuth::new(
            var("BASIC_AUTH_USERNAME").unwrap_or_default(),
            var("BASIC_AUTH_PASSWORD").unwrap_or_default(),
        );

        Ok(Self {
            proxy: ProxyConfig {
                server: ServerConfig { port },
                provider: ProviderConfig::Cloudflare {
                    api_token: var("CLOUDFLARE_API_TOKEN").unwrap_or_default(),
                    zone_id: var("CLOUDFLARE_ZONE_ID").unwrap_or_default(),
                },
                auth: auth.is_enabled().then_some(auth),
            },
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// The process must not start serving when this fails.
    pub fn validate(&self) -> Result<()> {
        self.proxy.validate()?;
        self.level()?;
        Ok(())
    }

    /// Parsed log level
    pub fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    /// Listen port
    pub fn port(&self) -> u16 {
        self.proxy.server.port
    }

    /// Credentials to enforce on `/nic/update`, if any
    pub fn basic_auth(&self) -> Option<BasicAuth> {
        self.proxy.enforced_auth().cloned()
    }
}
