//! HTTP presentation layer
//!
//! The axum router and handlers for the email-automation webhook.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
