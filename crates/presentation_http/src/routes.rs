//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status endpoints
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Inbound email webhook
        .route("/email/webhook", post(handlers::email::handle_incoming_email))
        // Attach state
        .with_state(state)
}
