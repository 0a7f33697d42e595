// # dyndns-proxy
//
// Thin integration layer between HTTP and `dyndns-core`:
// - `config`: environment variables → `ProxyConfig`
// - `server`: axum router for `/nic/update` and `/health`
//
// No DNS or DynDNS decision logic lives here.

pub mod config;
pub mod server;

pub use config::Config;
pub use server::{AppState, router, serve};
