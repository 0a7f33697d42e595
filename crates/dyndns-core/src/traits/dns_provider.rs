// # DNS Provider Trait
//
// Defines the capability the update handler needs from a DNS-hosting API:
// read the current address record for a hostname, and replace its content.
//
// ## Implementations
//
// - Cloudflare: `dyndns-provider-cloudflare` crate
// - In-memory: `dyndns_core::provider::MemoryProvider` (tests, local runs)
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::DnsProvider;
//
// async fn sync(provider: &dyn DnsProvider) -> dyndns_core::Result<()> {
//     let record = provider.fetch_record("home.example.com").await?;
//     if record.address != "1.2.3.4" {
//         provider
//             .update_record(&record.id, "home.example.com", "1.2.3.4")
//             .await?;
//     }
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// The provider's current view of one address record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    /// The record ID (provider-specific, opaque)
    pub id: String,
    /// The record content, compared verbatim against the requested address
    pub address: String,
}

impl RemoteRecord {
    /// Create a new remote record
    pub fn new(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
        }
    }
}

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe: one instance is shared by every
/// in-flight request.
///
/// # Trust Level: Untrusted
///
/// Providers only translate calls into API requests:
///
/// - ✅ Perform HTTP/HTTPS API calls to their endpoints only
/// - ✅ Parse provider-specific responses
/// - ✅ Return success or failure
/// - ❌ Retry or back off (a failure is terminal for the request)
/// - ❌ Cache records between calls
/// - ❌ Spawn tasks or threads
/// - ❌ Decide whether an update is needed (owned by `UpdateHandler`)
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the current address record for `hostname`
    ///
    /// When the provider returns several matching records, the first one
    /// in provider order is used.
    ///
    /// # Returns
    ///
    /// - `Ok(RemoteRecord)`: The record's id and current content
    /// - `Err(Error::NotFound)`: No record matched
    /// - `Err(_)`: Transport failure, timeout or a non-success response
    async fn fetch_record(&self, hostname: &str) -> Result<RemoteRecord, crate::Error>;

    /// Replace the content of record `record_id` with `address`
    ///
    /// The record is written as an `A` record with automatic TTL and
    /// proxying disabled.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The record now holds `address`
    /// - `Err(_)`: Transport failure, timeout or a non-success response
    async fn update_record(
        &self,
        record_id: &str,
        hostname: &str,
        address: &str,
    ) -> Result<(), crate::Error>;
}
