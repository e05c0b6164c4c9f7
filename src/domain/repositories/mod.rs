//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CampaignRepository`] - Campaign resolution by link id
//! - [`ClickRepository`] - Click log writes and origin rate counts
//! - [`BlocklistRepository`] - Identity blocklist membership

pub mod blocklist_repository;
pub mod campaign_repository;
pub mod click_repository;

pub use blocklist_repository::BlocklistRepository;
pub use campaign_repository::CampaignRepository;
pub use click_repository::ClickRepository;

#[cfg(test)]
pub use blocklist_repository::MockBlocklistRepository;
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use click_repository::MockClickRepository;
