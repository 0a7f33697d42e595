// # dyndns-core
//
// Core library for the DynDNS update proxy.
//
// ## Architecture Overview
//
// This library translates DynDNS update requests into DNS provider calls:
// - **DnsProvider**: Trait for reading and replacing address records via provider APIs
// - **UpdateHandler**: Validates a request and reconciles the remote record with it
// - **UpdateOutcome**: The protocol answer (`good`, `nochg`, `badauth`, `notfqdn`, `badip`, `911`)
// - **ClientOrigin**: Derives the caller's address when `myip` is absent
// - **BasicAuth**: Optional HTTP Basic credentials for the update endpoint
//
// ## Design Principles
//
// 1. **Separation of Concerns**: No HTTP server or client code; the proxy binary adapts HTTP
// 2. **Injected Dependencies**: Configuration and provider are passed in, never global
// 3. **Stateless**: Every request fetches fresh remote state; nothing is cached
// 4. **Single-shot**: One read and at most one write per request, no retries

pub mod address;
pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod provider;
pub mod traits;

// Re-export core types for convenience
pub use address::{ClientOrigin, is_valid_address};
pub use auth::BasicAuth;
pub use config::{ProviderConfig, ProxyConfig, ServerConfig};
pub use error::{Error, Result};
pub use handler::{Rejection, UpdateHandler, UpdateOutcome, UpdateRequest};
pub use provider::MemoryProvider;
pub use traits::{DnsProvider, RemoteRecord};
