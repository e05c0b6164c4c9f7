//! Click record produced once per evaluated visit.

use uuid::Uuid;

use super::{Campaign, Visit};

/// Final decision for a click, stored in the `click_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "click_status", rename_all = "lowercase")]
pub enum ClickStatus {
    Allowed,
    Fraud,
}

impl ClickStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Fraud => "fraud",
        }
    }
}

/// A finalized click decision ready to be appended to the `clicks` table.
///
/// Built by the click service after the fraud pipeline and macro
/// substitution have run, then handed to the click worker. Never updated
/// once written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub click_id: Uuid,
    pub link_id: Uuid,
    pub campaign_id: Uuid,
    pub user_id: String,
    pub status: ClickStatus,
    pub fraud_reasons: Vec<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub gaid: Option<String>,
    pub idfa: Option<String>,
}

impl NewClick {
    /// Builds the record for `visit` against the resolved `campaign`.
    pub fn for_visit(
        click_id: Uuid,
        campaign: &Campaign,
        visit: Visit,
        status: ClickStatus,
        fraud_reasons: Vec<String>,
    ) -> Self {
        Self {
            click_id,
            link_id: campaign.link_id,
            campaign_id: campaign.campaign_id,
            user_id: visit.user_id,
            status,
            fraud_reasons,
            ip: visit.ip,
            user_agent: visit.user_agent,
            referrer: visit.referrer,
            gaid: visit.gaid,
            idfa: visit.idfa,
        }
    }
}
