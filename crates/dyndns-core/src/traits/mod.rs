//! Core traits for the DynDNS proxy
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsProvider`]: Read and replace address records via a provider API

pub mod dns_provider;

pub use dns_provider::{DnsProvider, RemoteRecord};
