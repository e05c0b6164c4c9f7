//! Origin address rate-limit check.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use super::{FraudCheck, FraudVerdict};
use crate::domain::entities::Visit;
use crate::domain::repositories::ClickRepository;

/// Blocks when the origin address already produced `max_clicks` or more
/// click records within the trailing `window`.
///
/// Counts are read fresh from click storage on every call.
pub struct IpRateLimitCheck {
    clicks: Arc<dyn ClickRepository>,
    max_clicks: i64,
    window: Duration,
}

impl IpRateLimitCheck {
    pub fn new(clicks: Arc<dyn ClickRepository>, max_clicks: i64, window: Duration) -> Self {
        Self {
            clicks,
            max_clicks,
            window,
        }
    }
}

#[async_trait]
impl FraudCheck for IpRateLimitCheck {
    fn name(&self) -> &'static str {
        "ip_rate_limit"
    }

    async fn check(&self, visit: &Visit) -> FraudVerdict {
        let Some(ip) = visit.ip.as_deref() else {
            return FraudVerdict::pass("ip_address not provided");
        };

        match self.clicks.count_by_ip_within(ip, self.window).await {
            Ok(count) if count >= self.max_clicks => FraudVerdict::block(format!(
                "ip_rate_limit: {}+ clicks from same IP in last {} seconds",
                self.max_clicks,
                self.window.num_seconds()
            )),
            Ok(_) => FraudVerdict::pass("ip_rate_limit: within rate limit"),
            Err(_) => FraudVerdict::pass("error checking IP rate limit"),
        }
    }
}
