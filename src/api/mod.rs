//! HTTP layer for the tracking endpoint and operational probes.
//!
//! This layer decodes requests into domain values and renders decisions as
//! HTTP responses. It holds no decision logic of its own.
//!
//! # Modules
//!
//! - [`dto`] - Query and response shapes
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
