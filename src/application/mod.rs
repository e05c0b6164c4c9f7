//! Application layer services implementing the click decision.
//!
//! Services consume repository traits and domain components and expose a
//! single entry point per use case to HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::click_service::ClickService`] - Tracking link visit decision

pub mod services;
