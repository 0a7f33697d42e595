//! HTTP surface of the proxy
//!
//! | Method | Path          | Response                                        |
//! |--------|---------------|-------------------------------------------------|
//! | GET    | `/nic/update` | `good`/`nochg <ip>`, `badauth`, `notfqdn`, `badip`, `911` |
//! | GET    | `/health`     | `OK`                                            |
//!
//! This layer only adapts HTTP to [`UpdateRequest`] and [`UpdateOutcome`]
//! back to HTTP; every decision is made by [`UpdateHandler`].

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::{ConnectInfo, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use dyndns_core::{ClientOrigin, Rejection, UpdateHandler, UpdateOutcome, UpdateRequest};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Challenge sent with `badauth`
const BASIC_REALM: &str = r#"Basic realm="DynDNS""#;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Shared state for request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// The update handler, built once at startup
    pub handler: UpdateHandler,
}

impl AppState {
    pub fn new(handler: UpdateHandler) -> Self {
        Self { handler }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/nic/update", get(update))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on `listener` until `shutdown` resolves
///
/// Connection info is attached so the update endpoint can fall back to the
/// peer address.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

async fn update(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let request = update_request(query.as_deref(), &headers, peer);

    render(state.handler.handle(request).await)
}

/// Translate the raw HTTP pieces into an update request
fn update_request(
    query: Option<&str>,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
) -> UpdateRequest {
    UpdateRequest {
        hostname: query_value(query, "hostname"),
        myip: query_value(query, "myip"),
        authorization: header_value(headers, header::AUTHORIZATION.as_str()),
        origin: ClientOrigin {
            forwarded_for: header_value(headers, X_FORWARDED_FOR),
            real_ip: header_value(headers, X_REAL_IP),
            peer: peer.map(|addr| addr.to_string()),
        },
    }
}

/// First value of `key` in a URL query string
fn query_value(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Render an outcome as a plain-text DynDNS response
fn render(outcome: UpdateOutcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = outcome.to_string();

    if outcome == UpdateOutcome::Rejected(Rejection::BadAuth) {
        return (status, [(header::WWW_AUTHENTICATE, BASIC_REALM)], body).into_response();
    }

    (status, body).into_response()
}
