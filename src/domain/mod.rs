//! Domain layer containing business entities and decision logic.
//!
//! # Architecture
//!
//! - [`entities`] - Campaigns, visits and click records
//! - [`repositories`] - Data access trait definitions
//! - [`fraud`] - Rule-based fraud checks and their pipeline
//! - [`macro_substitution`] - Destination URL placeholder substitution
//! - [`click_worker`] - Detached, bounded click persistence
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler decodes a [`entities::Visit`]
//! 2. [`crate::application::services::ClickService`] resolves the campaign,
//!    runs the [`fraud::FraudPipeline`] and substitutes macros
//! 3. The finalized [`entities::NewClick`] is dispatched to the click queue
//! 4. [`click_worker::run_click_worker`] persists it via
//!    [`repositories::ClickRepository`]

pub mod click_worker;
pub mod entities;
pub mod fraud;
pub mod macro_substitution;
pub mod repositories;
