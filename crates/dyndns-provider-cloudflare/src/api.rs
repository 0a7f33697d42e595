//! Cloudflare API v4 payloads
//!
//! Only the fields this provider reads or writes are modelled; everything
//! else in the responses is ignored.

use serde::{Deserialize, Serialize};

/// Response wrapper shared by every Cloudflare API v4 endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
}

/// Entry of the envelope's `errors` list
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// A DNS record as returned by `GET /zones/:zone_id/dns_records`
#[derive(Debug, Deserialize)]
pub(crate) struct DnsRecord {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `PUT /zones/:zone_id/dns_records/:record_id`
#[derive(Debug, Serialize)]
pub(crate) struct UpdateRecordRequest<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    /// 1 means "automatic"
    pub ttl: u32,
    pub proxied: bool,
}
