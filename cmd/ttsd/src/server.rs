//! HTTP server.
//!
//! API endpoints:
//! - POST /api/tts - synthesize `{text, locale, rate?, pitch?}` into an audio download
//! - GET /health   - `{status, provider}` JSON

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{HeaderPolicy, ServerConfig};
use crate::handler;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<qanet_tts::Router>,
    pub header_policy: HeaderPolicy,
}

/// Builds the application with routes and middleware.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Result<Router> {
    Ok(Router::new()
        .route("/api/tts", post(handler::synthesize))
        .route("/health", get(handler::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins)?)
        .with_state(state))
}

/// Credentials are allowed, so every origin must be listed explicitly.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            if o.trim() == "*" {
                anyhow::bail!("wildcard CORS origin '*' cannot be used with credentials");
            }
            HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{}'", o))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Parse address string to SocketAddr. `:port` binds all interfaces.
pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    addr.parse()
        .with_context(|| format!("invalid listen address '{}'", addr))
}

/// Serves until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig, router: qanet_tts::Router) -> Result<()> {
    let provider = router.identity();
    let state = AppState {
        router: Arc::new(router),
        header_policy: config.header_policy,
    };
    let app = build_app(state, &config.cors_origins)?;

    let addr = parse_addr(&config.addr)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!(
        %addr,
        %provider,
        header_policy = %config.header_policy,
        "ttsd: listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ttsd: shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ttsd: failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "ttsd: failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("ttsd: received Ctrl+C, shutting down"),
        _ = terminate => info!("ttsd: received SIGTERM, shutting down"),
    }
}
