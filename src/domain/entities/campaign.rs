//! Campaign entity resolved from a tracking link.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a campaign as stored in the `campaign_status` enum.
///
/// Only [`CampaignStatus::Active`] campaigns are eligible for redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStatus {
    Active,
    Inactive,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown campaign status '{other}'")),
        }
    }
}

/// A time-bounded redirect configuration bound to one tracking link.
///
/// Campaigns are maintained by an external management process; this service
/// only reads them. The destination `target_url` is a template that may
/// contain `{user_id}`, `{gaid}` and `{click_id}` placeholders.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub campaign_id: Uuid,
    pub link_id: Uuid,
    pub status: CampaignStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub target_url: String,
}

impl Campaign {
    /// Returns true if the campaign may serve a redirect at `now`.
    ///
    /// Requires an active status and both window bounds. The window is
    /// inclusive on both ends.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        if self.status != CampaignStatus::Active {
            return false;
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => now >= start && now <= end,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn campaign(
        status: CampaignStatus,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Campaign {
        Campaign {
            campaign_id: Uuid::new_v4(),
            link_id: Uuid::new_v4(),
            status,
            start_date: start,
            end_date: end,
            target_url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn test_active_campaign_inside_window_is_live() {
        let now = Utc::now();
        let c = campaign(
            CampaignStatus::Active,
            Some(now - Duration::hours(1)),
            Some(now + Duration::hours(1)),
        );
        assert!(c.is_live_at(now));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let now = Utc::now();
        let c = campaign(CampaignStatus::Active, Some(now), Some(now));
        assert!(c.is_live_at(now));
    }

    #[test]
    fn test_inactive_campaign_is_not_live() {
        let now = Utc::now();
        for status in [
            CampaignStatus::Inactive,
            CampaignStatus::Paused,
            CampaignStatus::Completed,
        ] {
            let c = campaign(
                status,
                Some(now - Duration::hours(1)),
                Some(now + Duration::hours(1)),
            );
            assert!(!c.is_live_at(now), "{} should not be live", status.as_str());
        }
    }

    #[test]
    fn test_missing_bounds_are_not_live() {
        let now = Utc::now();
        assert!(!campaign(CampaignStatus::Active, None, Some(now + Duration::hours(1))).is_live_at(now));
        assert!(!campaign(CampaignStatus::Active, Some(now - Duration::hours(1)), None).is_live_at(now));
        assert!(!campaign(CampaignStatus::Active, None, None).is_live_at(now));
    }

    #[test]
    fn test_outside_window_is_not_live() {
        let now = Utc::now();
        let ended = campaign(
            CampaignStatus::Active,
            Some(now - Duration::days(2)),
            Some(now - Duration::days(1)),
        );
        let upcoming = campaign(
            CampaignStatus::Active,
            Some(now + Duration::days(1)),
            Some(now + Duration::days(2)),
        );
        assert!(!ended.is_live_at(now));
        assert!(!upcoming.is_live_at(now));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<CampaignStatus>(), Ok(CampaignStatus::Active));
        assert_eq!("paused".parse::<CampaignStatus>(), Ok(CampaignStatus::Paused));
        assert!("archived".parse::<CampaignStatus>().is_err());
    }
}
