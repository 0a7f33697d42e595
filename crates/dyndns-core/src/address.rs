//! Client address derivation and syntax checks
//!
//! DynDNS clients usually omit `myip` and expect the server to use the
//! address the request came from. Behind a reverse proxy that address is in
//! `X-Forwarded-For` or `X-Real-IP` rather than on the socket.

use std::net::{IpAddr, SocketAddr};

/// Where a request came from, as seen by the HTTP layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOrigin {
    /// Raw `X-Forwarded-For` header value
    pub forwarded_for: Option<String>,
    /// Raw `X-Real-IP` header value
    pub real_ip: Option<String>,
    /// Connection peer address, usually `ip:port`
    pub peer: Option<String>,
}

impl ClientOrigin {
    /// Origin known only by its connection peer
    pub fn from_peer(peer: impl Into<String>) -> Self {
        Self {
            peer: Some(peer.into()),
            ..Self::default()
        }
    }

    /// Set the `X-Forwarded-For` value
    pub fn with_forwarded_for(mut self, value: impl Into<String>) -> Self {
        self.forwarded_for = Some(value.into());
        self
    }

    /// Set the `X-Real-IP` value
    pub fn with_real_ip(mut self, value: impl Into<String>) -> Self {
        self.real_ip = Some(value.into());
        self
    }

    /// Resolve the caller's address
    ///
    /// Precedence:
    /// 1. First entry of `X-Forwarded-For`, trimmed
    /// 2. `X-Real-IP`, verbatim
    /// 3. Peer address with its port removed
    ///
    /// Empty headers are skipped. Returns an empty string when nothing is
    /// known, which then fails [`is_valid_address`].
    pub fn resolve(&self) -> String {
        if let Some(forwarded) = non_empty(self.forwarded_for.as_deref()) {
            let first = forwarded.split(',').next().unwrap_or_default();
            return first.trim().to_string();
        }

        if let Some(real_ip) = non_empty(self.real_ip.as_deref()) {
            return real_ip.to_string();
        }

        self.peer.as_deref().map(strip_port).unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Remove the port suffix from a peer address
///
/// Understands socket-address syntax (`1.2.3.4:80`, `[::1]:80`) and bare
/// addresses; anything else loses the text after its last `:`.
fn strip_port(peer: &str) -> String {
    if let Ok(addr) = peer.parse::<SocketAddr>() {
        return addr.ip().to_string();
    }

    if peer.parse::<IpAddr>().is_ok() {
        return peer.to_string();
    }

    match peer.rsplit_once(':') {
        Some((host, _port)) => host.to_string(),
        None => peer.to_string(),
    }
}

/// Check whether `address` looks like an IP address
///
/// Accepts four dot-separated non-empty segments as IPv4, or anything
/// containing a colon as IPv6. Segment values and IPv6 structure are not
/// checked: `999.999.999.999` passes.
pub fn is_valid_address(address: &str) -> bool {
    let segments: Vec<&str> = address.split('.').collect();
    if segments.len() == 4 {
        return segments.iter().all(|segment| !segment.is_empty());
    }

    address.contains(':')
}
