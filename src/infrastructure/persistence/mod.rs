//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries against the schema in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgCampaignRepository`] - Campaign resolution by link id
//! - [`PgClickRepository`] - Click inserts and origin rate counts
//! - [`PgBlocklistRepository`] - Blocklist membership and management

pub mod pg_blocklist_repository;
pub mod pg_campaign_repository;
pub mod pg_click_repository;

pub use pg_blocklist_repository::{BlocklistEntry, PgBlocklistRepository};
pub use pg_campaign_repository::PgCampaignRepository;
pub use pg_click_repository::PgClickRepository;
