//! Click decision service: campaign resolution, fraud evaluation, macro
//! substitution and click dispatch for a single visit.

use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use tracing::{Span, debug, info, warn};
use uuid::Uuid;

use crate::domain::click_worker::ClickWriter;
use crate::domain::entities::{ClickStatus, NewClick, Visit};
use crate::domain::fraud::FraudPipeline;
use crate::domain::macro_substitution::{MacroValues, substitute};
use crate::domain::repositories::CampaignRepository;

/// Body returned when the visit carries no user identifier.
pub const VALUES_MISSING_BODY: &str = "values missing";

/// Body shared by every non-redirect outcome: unknown link, unavailable
/// campaign and fraud. Callers cannot tell these outcomes apart.
pub const NOT_AVAILABLE_BODY: &str = "<html><body>campaign not available</body></html>";

/// Response description for a tracking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackResponse {
    /// `400` with [`VALUES_MISSING_BODY`].
    ValuesMissing,
    /// `200` with [`NOT_AVAILABLE_BODY`].
    NotAvailable,
    /// `302` to the substituted destination URL.
    Redirect { location: String },
}

impl TrackResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValuesMissing => StatusCode::BAD_REQUEST,
            Self::NotAvailable => StatusCode::OK,
            Self::Redirect { .. } => StatusCode::FOUND,
        }
    }

    pub fn body(&self) -> String {
        match self {
            Self::ValuesMissing => VALUES_MISSING_BODY.to_string(),
            Self::NotAvailable => NOT_AVAILABLE_BODY.to_string(),
            Self::Redirect { location } => format!(
                r#"<html><head><meta http-equiv="refresh" content="0;url={location}"></head><body>Redirecting...</body></html>"#
            ),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect { location } => Some(location),
            _ => None,
        }
    }

    pub fn is_html(&self) -> bool {
        !matches!(self, Self::ValuesMissing)
    }
}

/// Orchestrates the decision for one visit to a tracking link.
///
/// Storage lookups run sequentially inside the calling request's task. The
/// click record is handed to the [`ClickWriter`] and never awaited.
pub struct ClickService {
    campaigns: Arc<dyn CampaignRepository>,
    fraud: FraudPipeline,
    writer: ClickWriter,
    block_threshold: usize,
    span: Span,
}

impl ClickService {
    /// Creates a click service.
    ///
    /// `block_threshold` is the number of blocking fraud verdicts at which a
    /// click is classified as fraud. `span` is the parent of every diagnostic
    /// the service emits.
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        fraud: FraudPipeline,
        writer: ClickWriter,
        block_threshold: usize,
        span: Span,
    ) -> Self {
        Self {
            campaigns,
            fraud,
            writer,
            block_threshold,
            span,
        }
    }

    /// Decides the outcome of a visit.
    ///
    /// # Flow
    ///
    /// 1. Missing user id: `400`, no click record
    /// 2. Malformed link id, unknown or unavailable campaign: "not available",
    ///    no click record
    /// 3. Otherwise generate a click id, run every fraud check, substitute
    ///    macros, classify and dispatch the click record
    /// 4. Fraud: "not available"; allowed: `302` to the substituted URL
    ///
    /// A click is fraud when the blocking verdicts reach the threshold or a
    /// placeholder in the destination could not be filled.
    pub async fn handle_click(&self, visit: Visit) -> TrackResponse {
        if !visit.has_user_id() {
            return TrackResponse::ValuesMissing;
        }

        let Ok(link_id) = Uuid::parse_str(&visit.link_id) else {
            debug!(parent: &self.span, link_id = %visit.link_id, "Malformed link id");
            return TrackResponse::NotAvailable;
        };

        let campaign = match self.campaigns.find_by_link_id(link_id).await {
            Ok(Some(campaign)) => campaign,
            Ok(None) => {
                debug!(parent: &self.span, %link_id, "No campaign for link");
                return TrackResponse::NotAvailable;
            }
            Err(e) => {
                warn!(parent: &self.span, %link_id, error = %e, "Campaign lookup failed");
                return TrackResponse::NotAvailable;
            }
        };

        if !campaign.is_live_at(Utc::now()) {
            debug!(
                parent: &self.span,
                %link_id,
                campaign_id = %campaign.campaign_id,
                status = campaign.status.as_str(),
                "Campaign not available"
            );
            return TrackResponse::NotAvailable;
        }

        let click_id = Uuid::new_v4();
        let report = self.fraud.run(&visit).await;
        let substitution = substitute(&campaign.target_url, &MacroValues::new(&visit, click_id));

        let mut reasons = report.blocking_reasons();
        let mut status = if report.exceeds(self.block_threshold) {
            ClickStatus::Fraud
        } else {
            ClickStatus::Allowed
        };

        if !substitution.missing.is_empty() {
            status = ClickStatus::Fraud;
            reasons.push(format!(
                "missing required macros: {}",
                substitution.missing.join(", ")
            ));
        }

        metrics::counter!("clicks_total", "status" => status.as_str()).increment(1);
        info!(
            parent: &self.span,
            %click_id,
            %link_id,
            campaign_id = %campaign.campaign_id,
            status = status.as_str(),
            block_count = report.block_count,
            "Click evaluated"
        );

        self.writer
            .dispatch(NewClick::for_visit(click_id, &campaign, visit, status, reasons));

        match status {
            ClickStatus::Fraud => TrackResponse::NotAvailable,
            ClickStatus::Allowed => TrackResponse::Redirect {
                location: substitution.url,
            },
        }
    }
}
