use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and how many API keys are in rotation (never the keys).
/// Reports "degraded" when no key is configured, since every AI call will fail.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let status = if state.rotator.is_empty() {
        "degraded"
    } else {
        "ok"
    };

    Json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "devaura-api",
        "credentials": state.rotator.len()
    }))
}
