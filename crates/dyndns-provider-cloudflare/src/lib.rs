// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare implementation of `DnsProvider` for the
// DynDNS update proxy.
//
// ## Behaviour
//
// - ✅ One HTTP request per trait call
// - ✅ HTTP timeout configured (10 seconds)
// - ✅ Envelope-level error reporting (`success: false` + `errors[]`)
// - ✅ Specific messages for HTTP status codes (401/403, 404, 429, 5xx)
// - ✅ First matching record wins when a name has several records
// - ❌ NO retry logic (a failure is terminal for the DynDNS request)
// - ❌ NO caching (every update request sees fresh remote state)
// - ❌ NO record creation (records must already exist)
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - Provider construction fails if token or zone is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...`
// - Overwrite DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

mod api;

use async_trait::async_trait;
use dyndns_core::config::ProviderConfig;
use dyndns_core::traits::{DnsProvider, RemoteRecord};
use dyndns_core::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::{DnsRecord, Envelope, UpdateRecordRequest};

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (10 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

const PROVIDER_NAME: &str = "cloudflare";

/// Record type written on update
const RECORD_TYPE: &str = "A";

/// Cloudflare's "automatic" TTL
const AUTOMATIC_TTL: u32 = 1;

/// Cloudflare DNS provider
///
/// Stateless and single-shot: each trait call maps to exactly one API
/// request against the configured zone.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// Zone holding the managed records
    zone_id: String,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `zone_id`: Zone containing the records to update
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if either value is empty or the HTTP client
    /// cannot be built.
    pub fn new(api_token: impl Into<String>, zone_id: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        let zone_id = zone_id.into();

        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }
        if zone_id.is_empty() {
            return Err(Error::config("Cloudflare zone ID cannot be empty"));
        }

        Ok(Self {
            api_token,
            zone_id,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client: build_client(DEFAULT_HTTP_TIMEOUT)?,
        })
    }

    /// Create a provider from configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;
        match config {
            ProviderConfig::Cloudflare { api_token, zone_id } => {
                Self::new(api_token.clone(), zone_id.clone())
            }
        }
    }

    /// Point the provider at a different API root (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// The configured zone ID
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, self.zone_id)
    }

    /// Send an authenticated request and unwrap the Cloudflare envelope
    ///
    /// Fails on transport errors, non-2xx statuses and `success: false`.
    /// Undecodable bodies on a 2xx response become `Error::Json`. Returns the envelope's `result`, which may be absent.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<Option<T>> {
        let response = request
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(e, context))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, context))?;

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(status_error(status, context, &body)),
            Err(e) => {
                tracing::debug!("{}: failed to parse response", context);
                return Err(e.into());
            }
        };

        if !envelope.success || !status.is_success() {
            return Err(match envelope.errors.first() {
                Some(api_error) => Error::provider(
                    PROVIDER_NAME,
                    format!(
                        "{}: Cloudflare API error {}: {}",
                        context, api_error.code, api_error.message
                    ),
                ),
                None if !status.is_success() => status_error(status, context, &body),
                None => Error::provider(
                    PROVIDER_NAME,
                    format!("{}: Cloudflare API returned error", context),
                ),
            });
        }

        Ok(envelope.result)
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))
}

fn transport_error(err: reqwest::Error, context: &str) -> Error {
    if err.is_timeout() {
        Error::timeout(format!("{}: Cloudflare API request timed out", context))
    } else {
        Error::http(format!("{}: HTTP request failed: {}", context, err))
    }
}

/// Map a non-success HTTP status without a usable envelope to an error
fn status_error(status: StatusCode, context: &str, body: &str) -> Error {
    let message = match status.as_u16() {
        401 | 403 => format!(
            "Authentication failed: Invalid API token or insufficient permissions. Status: {}",
            status
        ),
        404 => format!("Zone or record not found. Status: {}", status),
        429 => format!("Rate limit exceeded. Please retry later. Status: {}", status),
        500..=599 => format!("Cloudflare server error (transient): {} - {}", status, body),
        _ => format!("Unexpected response: {} - {}", status, body),
    };
    Error::provider(PROVIDER_NAME, format!("{}: {}", context, message))
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// Look up the record for `hostname`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?name=test.example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn fetch_record(&self, hostname: &str) -> Result<RemoteRecord> {
        tracing::debug!("Looking up Cloudflare DNS record: {}", hostname);

        let request = self
            .client
            .get(self.records_url())
            .query(&[("name", hostname)]);
        let records: Vec<DnsRecord> = self
            .send(request, "Record lookup")
            .await?
            .unwrap_or_default();

        if records.len() > 1 {
            tracing::debug!(
                "{} records match {}, using the first one",
                records.len(),
                hostname
            );
        }

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", hostname)))?;

        tracing::debug!("Found record ID: {}", record.id);
        Ok(RemoteRecord::new(record.id, record.content))
    }

    /// Overwrite record `record_id` with `address`
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    ///
    /// {"type": "A", "name": "...", "content": "1.2.3.4", "ttl": 1, "proxied": false}
    /// ```
    async fn update_record(&self, record_id: &str, hostname: &str, address: &str) -> Result<()> {
        if record_id.is_empty() {
            return Err(Error::invalid_input(format!(
                "Record update: empty record ID for {}",
                hostname
            )));
        }

        tracing::info!(
            "Updating Cloudflare DNS record: {} -> {} ({})",
            hostname,
            address,
            RECORD_TYPE
        );

        let payload = UpdateRecordRequest {
            record_type: RECORD_TYPE,
            name: hostname,
            content: address,
            ttl: AUTOMATIC_TTL,
            proxied: false,
        };

        let request = self
            .client
            .put(format!("{}/{}", self.records_url(), record_id))
            .json(&payload);
        self.send::<serde_json::Value>(request, "Record update")
            .await?;

        tracing::info!("DNS record updated successfully: {} -> {}", hostname, address);
        Ok(())
    }
}
