//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /track/{link_id}` - Tracking link visit (public)
//! - `GET /health`          - Health check: DB, click queue (public)
//!
//! Every request runs inside the tracing layer from
//! [`crate::api::middleware::tracing`].

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    api::routes::public_routes()
        .with_state(state)
        .layer(tracing::layer())
}
