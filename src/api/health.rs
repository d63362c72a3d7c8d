//! Health check endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::ApiState;

/// Build health router
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Build readiness router
pub fn ready_router(state: Arc<ApiState>) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    /// "live" with a provider credential, "demo" without
    pub mode: &'static str,
    pub chat_model: String,
    pub tts_model: String,
}

/// Liveness check: is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check
///
/// Demo mode is a supported configuration, so this never reports degraded.
async fn ready(State(state): State<Arc<ApiState>>) -> Json<ReadinessResponse> {
    let mode = if state.chat.is_live() { "live" } else { "demo" };

    Json(ReadinessResponse {
        status: "ok",
        mode,
        chat_model: state.chat_model.clone(),
        tts_model: state.tts_model.clone(),
    })
}
