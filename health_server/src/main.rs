//! Main entry point for the health server binary

use anyhow::Result;
use health_core::{
    create_app, register_builtin_probes, run_server, AppConfig, AppState, ConfigLookup,
    HealthRegistry,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let source = AppConfig::load_source()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    let config = AppConfig::from_source(&source)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let mut registry = HealthRegistry::new();
    if let Some(timeout) = config.health.probe_timeout() {
        info!("Health probes time out after {:?}", timeout);
        registry = registry.with_probe_timeout(timeout);
    }

    let lookup: Arc<dyn ConfigLookup> = Arc::new(source);
    register_builtin_probes(&registry, lookup, &config.health);

    let state = AppState::new(registry);
    info!("App: {} v{}", state.app_name, state.version);
    info!("Registered health probes: {:?}", state.registry.names());

    let app = create_app(state);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        };

        format!(
            "{}={},health_core={},tower_http=info",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            default_level,
            default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
