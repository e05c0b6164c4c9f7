//! Core domain entities.
//!
//! - [`Campaign`] - A redirect configuration resolved from a tracking link
//! - [`Visit`] - One inbound request to a tracking link
//! - [`NewClick`] - The finalized decision appended to click storage

pub mod campaign;
pub mod click;
pub mod visit;

pub use campaign::{Campaign, CampaignStatus};
pub use click::{ClickStatus, NewClick};
pub use visit::Visit;
