use super::health::{handle_health, handle_probe_health};
use crate::AppState;
use axum::{routing::get, Router};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .route("/health/:name", get(handle_probe_health))
}
