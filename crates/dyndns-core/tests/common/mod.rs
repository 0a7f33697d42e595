//! Test doubles and common utilities for update contract tests
//!
//! Most tests drive the handler against `MemoryProvider`; the doubles here
//! cover behaviours it cannot express.

#![allow(dead_code)]

use dyndns_core::error::Result;
use dyndns_core::traits::{DnsProvider, RemoteRecord};
use dyndns_core::{BasicAuth, MemoryProvider, UpdateHandler};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const HOSTNAME: &str = "test.example.com";
pub const RECORD_ID: &str = "record-123";

/// A provider whose calls never complete
pub struct HangingProvider {
    /// Call counter for fetch_record()
    fetch_call_count: Arc<AtomicUsize>,
}

impl HangingProvider {
    pub fn new() -> Self {
        Self {
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times fetch_record() was called
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_call_count.load(Ordering::SeqCst)
    }

    /// Create a new HangingProvider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            fetch_call_count: Arc::clone(&other.fetch_call_count),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for HangingProvider {
    async fn fetch_record(&self, _hostname: &str) -> Result<RemoteRecord> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn update_record(&self, _record_id: &str, _hostname: &str, _address: &str) -> Result<()> {
        std::future::pending().await
    }
}

/// A memory provider holding one record for [`HOSTNAME`]
pub async fn seeded_provider(current_ip: &str) -> MemoryProvider {
    let provider = MemoryProvider::new();
    provider.insert_record(HOSTNAME, RECORD_ID, current_ip).await;
    provider
}

/// Handler without authentication
pub fn open_handler(provider: &MemoryProvider) -> UpdateHandler {
    UpdateHandler::new(Arc::new(provider.clone()), None)
}

/// Handler requiring `admin` / `secret`
pub fn guarded_handler(provider: &MemoryProvider) -> UpdateHandler {
    UpdateHandler::new(
        Arc::new(provider.clone()),
        Some(BasicAuth::new("admin", "secret")),
    )
}
