//! Status handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Root status response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Human-readable status message
    pub message: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: &'static str,
    /// Whether a model extractor is configured
    pub extractor_configured: bool,
    /// Whether the mail relay is configured
    pub mailer_configured: bool,
}

/// `GET /` - liveness message
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Email assistant is running!",
    })
}

/// `GET /health` - configuration-aware health check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        extractor_configured: state.forward_service.has_extractor(),
        mailer_configured: state.mailer.is_configured(),
    })
}
