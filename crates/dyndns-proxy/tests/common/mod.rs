//! Router test utilities
//!
//! Requests go through the real axum router via `tower::ServiceExt::oneshot`;
//! the DNS provider is a shared `MemoryProvider`.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use dyndns_core::{BasicAuth, MemoryProvider, UpdateHandler};
use dyndns_proxy::{AppState, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

pub const HOSTNAME: &str = "test.example.com";
pub const RECORD_ID: &str = "record-123";
pub const PEER: &str = "192.168.1.1:12345";

/// Status, body and `WWW-Authenticate` header of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
    pub www_authenticate: Option<String>,
}

/// Test harness wrapping a router and the provider behind it
pub struct TestApp {
    pub provider: MemoryProvider,
    app: axum::Router,
}

impl TestApp {
    /// App without authentication, holding `HOSTNAME` at `current_ip`
    pub async fn open(current_ip: &str) -> Self {
        Self::build(current_ip, None).await
    }

    /// App requiring `admin` / `secret`
    pub async fn guarded(current_ip: &str) -> Self {
        Self::build(current_ip, Some(BasicAuth::new("admin", "secret"))).await
    }

    async fn build(current_ip: &str, auth: Option<BasicAuth>) -> Self {
        let provider = MemoryProvider::new();
        provider.insert_record(HOSTNAME, RECORD_ID, current_ip).await;

        let handler = UpdateHandler::new(Arc::new(provider.clone()), auth);
        Self {
            provider,
            app: router(AppState::new(handler)),
        }
    }

    /// GET `uri` from `PEER` with extra headers
    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let mut request = builder.body(Body::empty()).unwrap();
        let peer: SocketAddr = PEER.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let www_authenticate = response
            .headers()
            .get("www-authenticate")
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
            www_authenticate,
        }
    }
}
