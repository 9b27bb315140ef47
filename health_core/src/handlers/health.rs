//! Health report handlers

use crate::{
    health::{HealthReport, HealthState},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{info, warn};

fn status_code(state: HealthState) -> StatusCode {
    match state {
        HealthState::Up => StatusCode::OK,
        HealthState::Down => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /health - Running registered health probes");

    let report = HealthReport::from_outcomes(state.registry.run_all().await);

    if !report.is_up() {
        let down: Vec<&str> = report.down_checks().map(|c| c.name.as_str()).collect();
        warn!("Health is DOWN: {}", down.join(", "));
    }

    (status_code(report.outcome), Json(report))
}

pub async fn handle_probe_health(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    info!("GET /health/{} - Running single health probe", name);

    match state.registry.run_one(&name).await {
        Some(outcome) => (status_code(outcome.state), Json(json!(outcome))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("Health probe '{}' not found", name),
                "status": StatusCode::NOT_FOUND.as_u16(),
            })),
        ),
    }
}
