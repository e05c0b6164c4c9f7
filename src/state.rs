//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ClickService;
use crate::domain::click_worker::ClickWriter;
use crate::domain::repositories::CampaignRepository;

#[derive(Clone)]
pub struct AppState {
    pub click_service: Arc<ClickService>,
    /// Used by the health probe.
    pub campaigns: Arc<dyn CampaignRepository>,
    pub click_writer: ClickWriter,
}

impl AppState {
    pub fn new(
        click_service: Arc<ClickService>,
        campaigns: Arc<dyn CampaignRepository>,
        click_writer: ClickWriter,
    ) -> Self {
        Self {
            click_service,
            campaigns,
            click_writer,
        }
    }
}
