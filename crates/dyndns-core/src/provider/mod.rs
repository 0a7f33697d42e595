// # DNS Provider Implementations
//
// This module provides in-process implementations of the DnsProvider trait.
// Network-backed providers live in their own crates.

pub mod memory;

pub use memory::{MemoryProvider, RecordedUpdate};
