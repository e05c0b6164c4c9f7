//! Business logic services for the application layer.

pub mod click_service;

pub use click_service::{ClickService, TrackResponse};
