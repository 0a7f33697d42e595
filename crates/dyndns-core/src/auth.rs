//! HTTP Basic credential checking for the update endpoint

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const BASIC_PREFIX: &str = "Basic ";

/// Credentials a DynDNS client must present
///
/// Authentication is only enforced when both fields are non-empty; see
/// [`BasicAuth::is_enabled`].
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// Expected username
    pub username: String,
    /// Expected password
    /// ⚠️ NEVER log this value
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl BasicAuth {
    /// Create a new credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether these credentials should be enforced at all
    pub fn is_enabled(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Check an `Authorization` header value against these credentials
    ///
    /// The header must be `Basic <base64(user:pass)>` and both parts must
    /// match exactly. A missing or malformed header never matches.
    pub fn verify(&self, authorization: Option<&str>) -> bool {
        let Some(encoded) = authorization.and_then(|h| h.strip_prefix(BASIC_PREFIX)) else {
            return false;
        };

        let Ok(decoded) = STANDARD.decode(encoded) else {
            return false;
        };

        let Ok(credentials) = String::from_utf8(decoded) else {
            return false;
        };

        match credentials.split_once(':') {
            Some((username, password)) => username == self.username && password == self.password,
            None => false,
        }
    }
}

/// Build an `Authorization` header value for the given credentials
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!(
        "{}{}",
        BASIC_PREFIX,
        STANDARD.encode(format!("{}:{}", username, password))
    )
}
