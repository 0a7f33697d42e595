//! Request and outcome types for the DynDNS update contract

use std::fmt;

use crate::address::ClientOrigin;

/// A single DynDNS update request, as received over HTTP
///
/// Empty `hostname` and `myip` values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Hostname whose record should be updated (`hostname` query parameter)
    pub hostname: Option<String>,
    /// Explicitly requested address (`myip` query parameter)
    pub myip: Option<String>,
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// Where the request came from, used when `myip` is absent
    pub origin: ClientOrigin,
}

impl UpdateRequest {
    /// Create a request for `hostname`
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ..Self::default()
        }
    }

    /// Set the requested address
    pub fn with_myip(mut self, myip: impl Into<String>) -> Self {
        self.myip = Some(myip.into());
        self
    }

    /// Set the `Authorization` header value
    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    /// Set the client origin
    pub fn with_origin(mut self, origin: ClientOrigin) -> Self {
        self.origin = origin;
        self
    }
}

/// Why a request was refused before any provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Credentials missing, malformed or wrong
    BadAuth,
    /// No hostname given
    NotFqdn,
    /// Address failed the syntax check
    BadIp,
}

impl Rejection {
    /// The DynDNS response token
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::BadAuth => "badauth",
            Rejection::NotFqdn => "notfqdn",
            Rejection::BadIp => "badip",
        }
    }

    /// HTTP status paired with the token
    pub fn status_code(&self) -> u16 {
        match self {
            Rejection::BadAuth => 401,
            Rejection::NotFqdn | Rejection::BadIp => 400,
        }
    }
}

/// Result of handling one update request
///
/// `Display` renders the exact single-line response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record already held this address; nothing was written
    NoChange(String),
    /// The record was rewritten to this address
    Updated(String),
    /// The request was refused locally
    Rejected(Rejection),
    /// The provider failed; details are logged, never returned
    RemoteFailure,
}

impl UpdateOutcome {
    /// HTTP status code for this outcome
    pub fn status_code(&self) -> u16 {
        match self {
            UpdateOutcome::NoChange(_) | UpdateOutcome::Updated(_) => 200,
            UpdateOutcome::Rejected(rejection) => rejection.status_code(),
            UpdateOutcome::RemoteFailure => 500,
        }
    }

    /// Whether the record now holds the requested address
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::NoChange(_) | UpdateOutcome::Updated(_))
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::NoChange(address) => write!(f, "nochg {}", address),
            UpdateOutcome::Updated(address) => write!(f, "good {}", address),
            UpdateOutcome::Rejected(rejection) => f.write_str(rejection.as_str()),
            UpdateOutcome::RemoteFailure => f.write_str("911"),
        }
    }
}

impl From<Rejection> for UpdateOutcome {
    fn from(rejection: Rejection) -> Self {
        UpdateOutcome::Rejected(rejection)
    }
}
