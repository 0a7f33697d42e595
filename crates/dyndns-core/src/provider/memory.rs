// # Memory DNS Provider
//
// In-memory implementation of DnsProvider.
//
// ## Purpose
//
// A deterministic stand-in for a real DNS-hosting API:
// - Records live in a HashMap protected by a RwLock
// - Every call is counted and every update is recorded
// - Fetch and update failures can be switched on per instance
// - An optional artificial latency exercises the handler's timeout
//
// Clones share the same records and counters, so a test can keep one handle
// while the handler owns another.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::{DnsProvider, RemoteRecord};

/// Arguments of one `update_record` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    /// Record ID passed by the caller
    pub record_id: String,
    /// Hostname passed by the caller
    pub hostname: String,
    /// Address passed by the caller
    pub address: String,
}

#[derive(Debug, Default)]
struct Inner {
    records: RwLock<HashMap<String, RemoteRecord>>,
    updates: RwLock<Vec<RecordedUpdate>>,
    fetch_calls: AtomicUsize,
    update_calls: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_update: AtomicBool,
}

/// In-memory DNS provider
///
/// # Example
///
/// ```rust
/// use dyndns_core::provider::MemoryProvider;
/// use dyndns_core::DnsProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = MemoryProvider::new();
///     provider.insert_record("home.example.com", "rec-1", "1.1.1.1").await;
///
///     let record = provider.fetch_record("home.example.com").await?;
///     assert_eq!(record.address, "1.1.1.1");
///
///     provider.update_record(&record.id, "home.example.com", "1.2.3.4").await?;
///     assert_eq!(provider.update_calls(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    inner: Arc<Inner>,
    latency: Option<Duration>,
}

impl MemoryProvider {
    /// Create a new empty memory provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace the record for `hostname`
    pub async fn insert_record(
        &self,
        hostname: impl Into<String>,
        id: impl Into<String>,
        address: impl Into<String>,
    ) {
        let mut guard = self.inner.records.write().await;
        guard.insert(hostname.into(), RemoteRecord::new(id, address));
    }

    /// Current record for `hostname`, without counting as a fetch
    pub async fn record(&self, hostname: &str) -> Option<RemoteRecord> {
        self.inner.records.read().await.get(hostname).cloned()
    }

    /// Make every subsequent `fetch_record` fail (or succeed again)
    pub fn set_fetch_failure(&self, fail: bool) {
        self.inner.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `update_record` fail (or succeed again)
    pub fn set_update_failure(&self, fail: bool) {
        self.inner.fail_update.store(fail, Ordering::SeqCst);
    }

    /// Number of `fetch_record` calls so far
    pub fn fetch_calls(&self) -> usize {
        self.inner.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_record` calls so far
    pub fn update_calls(&self) -> usize {
        self.inner.update_calls.load(Ordering::SeqCst)
    }

    /// Arguments of every `update_record` call, in call order
    pub async fn updates(&self) -> Vec<RecordedUpdate> {
        self.inner.updates.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DnsProvider for MemoryProvider {
    async fn fetch_record(&self, hostname: &str) -> Result<RemoteRecord, Error> {
        self.inner.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.inner.fail_fetch.load(Ordering::SeqCst) {
            return Err(Error::provider("memory", "simulated fetch failure"));
        }

        self.inner
            .records
            .read()
            .await
            .get(hostname)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", hostname)))
    }

    async fn update_record(
        &self,
        record_id: &str,
        hostname: &str,
        address: &str,
    ) -> Result<(), Error> {
        self.inner.update_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.updates.write().await.push(RecordedUpdate {
            record_id: record_id.to_string(),
            hostname: hostname.to_string(),
            address: address.to_string(),
        });
        self.simulate_latency().await;

        if self.inner.fail_update.load(Ordering::SeqCst) {
            return Err(Error::provider("memory", "simulated update failure"));
        }

        let mut guard = self.inner.records.write().await;
        match guard.get_mut(hostname) {
            Some(record) if record.id == record_id => {
                record.address = address.to_string();
                Ok(())
            }
            _ => Err(Error::not_found(format!(
                "DNS record not found: {} (id: {})",
                hostname, record_id
            ))),
        }
    }
}
