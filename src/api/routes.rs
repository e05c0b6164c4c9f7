//! API route configuration.

use crate::api::handlers::{health_handler, track_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes. Tracking links are opened by end users, so nothing here
/// requires authentication.
///
/// # Endpoints
///
/// - `GET /track/{link_id}` - Click decision and redirect
/// - `GET /health`          - Database and click queue health
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/track/{link_id}", get(track_handler))
        .route("/health", get(health_handler))
}
