// # dyndns-proxy - DynDNS to Cloudflare bridge
//
// This binary is a THIN integration layer:
// - All update logic lives in dyndns-core
// - Configuration is via environment variables only
//
// It is responsible for:
// 1. Reading and validating configuration
// 2. Initializing logging and the runtime
// 3. Building the Cloudflare provider and update handler once
// 4. Serving `/nic/update` and `/health` until SIGTERM/SIGINT
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// export CLOUDFLARE_ZONE_ID=your_zone_id
// export BASIC_AUTH_USERNAME=router
// export BASIC_AUTH_PASSWORD=change-me
//
// dyndns-proxy
// curl -u router:change-me 'http://localhost:8080/nic/update?hostname=home.example.com&myip=1.2.3.4'
// ```

use anyhow::Result;
use dyndns_core::UpdateHandler;
use dyndns_provider_cloudflare::CloudflareProvider;
use dyndns_proxy::{AppState, Config, router, serve};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum ProxyExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<ProxyExitCode> for ExitCode {
    fn from(code: ProxyExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ProxyExitCode::ConfigError.into();
        }
    };

    // Refuse to start without provider credentials
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ProxyExitCode::ConfigError.into();
    }

    let log_level = match config.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return ProxyExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ProxyExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ProxyExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        if let Err(e) = run_proxy(config).await {
            error!("Proxy error: {}", e);
            ProxyExitCode::RuntimeError
        } else {
            ProxyExitCode::CleanShutdown
        }
    })
    .into()
}

/// Build the handler and serve until a shutdown signal arrives
async fn run_proxy(config: Config) -> Result<()> {
    let provider = CloudflareProvider::from_config(&config.proxy.provider)?;
    info!("Using Cloudflare zone {}", provider.zone_id());

    let auth = config.basic_auth();
    if auth.is_none() {
        warn!("Basic authentication disabled: BASIC_AUTH_USERNAME and BASIC_AUTH_PASSWORD not both set");
    }

    let handler = UpdateHandler::new(Arc::new(provider), auth);
    let app = router(AppState::new(handler));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting DynDNS Cloudflare Proxy on {}", addr);

    serve(listener, app, shutdown_signal()).await?;

    info!("Proxy stopped");
    Ok(())
}

/// Resolve once SIGTERM or SIGINT is received
#[cfg(unix)]
async fn shutdown_signal() {
    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to setup signal handlers: {}", e);
            return std::future::pending().await;
        }
    };

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!("Received shutdown signal: {}", received);
}

/// Resolve once CTRL-C is received
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal: SIGINT"),
        Err(e) => {
            error!("Failed to wait for CTRL-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
