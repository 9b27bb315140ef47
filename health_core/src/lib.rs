//! Concurrent health-check registry with built-in dependency probes and an
//! HTTP health endpoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;

pub use crate::config::{AppConfig, ConfigLookup};
pub use error::{AppError, ProbeError, Result};
pub use handlers::routes::create_routes;
pub use health::{
    register_builtin_probes, DataSourceProbe, FnProbe, HealthRegistry, HealthReport, HealthState,
    Outcome, Probe, RabbitProbe,
};

use axum::{http::Request, response::Response, Router};
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub registry: HealthRegistry,
}

impl AppState {
    pub fn new(registry: HealthRegistry) -> Self {
        Self {
            app_name: "Health Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            registry,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(HealthRegistry::new())
    }
}

pub fn create_app(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        })
        .on_response(|response: &Response, latency: Duration, _span: &Span| {
            tracing::debug!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis(),
                "response sent"
            );
        })
        .on_failure(());

    Router::new()
        .merge(create_routes())
        .layer(trace_layer)
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
