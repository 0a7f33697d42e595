//! Configuration types for the DynDNS proxy
//!
//! Values are loaded once at startup and never mutated afterwards; the
//! binary owns loading them from the environment.

use crate::auth::BasicAuth;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Main proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// Optional Basic Authentication for the update endpoint
    pub auth: Option<BasicAuth>,
}

impl ProxyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()
    }

    /// Credentials to enforce, if authentication is enabled
    pub fn enforced_auth(&self) -> Option<&BasicAuth> {
        self.auth.as_ref().filter(|auth| auth.is_enabled())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// DNS provider configuration
#[derive(Clone)]
pub enum ProviderConfig {
    /// Cloudflare provider
    Cloudflare {
        /// Cloudflare API token
        api_token: String,
        /// Zone holding the managed records
        zone_id: String,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Cloudflare { zone_id, .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"<REDACTED>")
                .field("zone_id", zone_id)
                .finish(),
        }
    }
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cloudflare { api_token, zone_id } => {
                if api_token.is_empty() || zone_id.is_empty() {
                    return Err(crate::Error::config(
                        "Missing required environment variables: CLOUDFLARE_API_TOKEN, CLOUDFLARE_ZONE_ID",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Cloudflare { .. } => "cloudflare",
        }
    }
}
