//! DynDNS update handler
//!
//! The UpdateHandler is responsible for:
//! - Enforcing Basic Authentication when configured
//! - Validating the hostname and target address
//! - Fetching the current record from the DnsProvider
//! - Writing the new address only when it differs
//!
//! ## Request Flow
//!
//! ```text
//!   UpdateRequest
//!        │
//!        ▼
//! ┌──────────────┐  badauth / notfqdn / badip
//! │  validation  │─────────────────────────────▶ Rejected
//! └──────────────┘
//!        │
//!        ▼
//! ┌──────────────┐  error / not found
//! │ fetch_record │─────────────────────────────▶ RemoteFailure (911)
//! └──────────────┘
//!        │
//!        ├── same address ─────────────────────▶ NoChange (nochg)
//!        ▼
//! ┌──────────────┐  error
//! │update_record │─────────────────────────────▶ RemoteFailure (911)
//! └──────────────┘
//!        │
//!        ▼
//!    Updated (good)
//! ```
//!
//! ## Concurrency
//!
//! The handler holds no mutable state. Concurrent requests for the same
//! hostname are not serialized; the provider sees last-write-wins.

mod outcome;

pub use outcome::{Rejection, UpdateOutcome, UpdateRequest};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::address::is_valid_address;
use crate::auth::BasicAuth;
use crate::error::{Error, Result};
use crate::traits::DnsProvider;

/// Upper bound for each provider call
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Implements the DynDNS update contract for one hostname per request
///
/// Cloning is cheap: the provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct UpdateHandler {
    /// DNS provider for reading and writing records
    provider: Arc<dyn DnsProvider>,

    /// Credentials to enforce (only set when enabled)
    auth: Option<BasicAuth>,

    /// Time budget for each provider call
    remote_timeout: Duration,
}

impl std::fmt::Debug for UpdateHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateHandler")
            .field("auth", &self.auth)
            .field("remote_timeout", &self.remote_timeout)
            .finish_non_exhaustive()
    }
}

impl UpdateHandler {
    /// Create a new update handler
    ///
    /// # Parameters
    ///
    /// - `provider`: DNS provider implementation
    /// - `auth`: Credentials to require; ignored unless both fields are non-empty
    pub fn new(provider: Arc<dyn DnsProvider>, auth: Option<BasicAuth>) -> Self {
        Self {
            provider,
            auth: auth.filter(BasicAuth::is_enabled),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Override the per-call provider timeout
    pub fn with_remote_timeout(mut self, remote_timeout: Duration) -> Self {
        self.remote_timeout = remote_timeout;
        self
    }

    /// Whether Basic Authentication is enforced
    pub fn auth_enabled(&self) -> bool {
        self.auth.is_some()
    }

    /// Handle one update request
    ///
    /// Makes at most one provider read and at most one provider write.
    /// Never retries: a failed call is terminal and reported as `911`.
    pub async fn handle(&self, request: UpdateRequest) -> UpdateOutcome {
        let (hostname, address) = match self.validate(request) {
            Ok(target) => target,
            Err(rejection) => return rejection.into(),
        };

        info!(hostname = %hostname, ip = %address, "Updating DNS record");

        let record = match self
            .bounded("fetch_record", self.provider.fetch_record(&hostname))
            .await
        {
            Ok(record) => record,
            Err(e) => {
                error!(hostname = %hostname, not_found = e.is_not_found(), "Error getting DNS record: {}", e);
                return UpdateOutcome::RemoteFailure;
            }
        };

        if record.address == address {
            debug!(hostname = %hostname, ip = %address, "DNS record already up to date");
            return UpdateOutcome::NoChange(address);
        }

        if let Err(e) = self
            .bounded(
                "update_record",
                self.provider.update_record(&record.id, &hostname, &address),
            )
            .await
        {
            error!(hostname = %hostname, "Error updating DNS record: {}", e);
            return UpdateOutcome::RemoteFailure;
        }

        info!(
            hostname = %hostname,
            ip = %address,
            previous_ip = %record.address,
            "DNS record updated"
        );
        UpdateOutcome::Updated(address)
    }

    /// Run the local checks, in contract order
    ///
    /// Returns the hostname and the resolved target address.
    fn validate(
        &self,
        request: UpdateRequest,
    ) -> std::result::Result<(String, String), Rejection> {
        if let Some(auth) = &self.auth
            && !auth.verify(request.authorization.as_deref())
        {
            warn!("Rejected update: bad credentials");
            return Err(Rejection::BadAuth);
        }

        let Some(hostname) = request.hostname.filter(|h| !h.is_empty()) else {
            warn!("Rejected update: missing hostname");
            return Err(Rejection::NotFqdn);
        };

        let address = match request.myip.filter(|ip| !ip.is_empty()) {
            Some(myip) => myip,
            None => request.origin.resolve(),
        };

        if !is_valid_address(&address) {
            warn!(hostname = %hostname, ip = %address, "Rejected update: invalid address");
            return Err(Rejection::BadIp);
        }

        Ok((hostname, address))
    }

    /// Bound a provider call by the remote timeout
    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.remote_timeout, call)
            .await
            .map_err(|_| {
                Error::timeout(format!(
                    "{} did not complete within {:?}",
                    operation, self.remote_timeout
                ))
            })?
    }
}
