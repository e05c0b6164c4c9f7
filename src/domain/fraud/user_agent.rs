//! Client agent automation-marker check.

use async_trait::async_trait;

use super::{FraudCheck, FraudVerdict};
use crate::domain::entities::Visit;

/// Lower-case substrings identifying scripted HTTP clients.
pub const AUTOMATION_MARKERS: &[&str] = &["curl/", "wget/", "python-requests"];

/// Blocks when the lower-cased agent string contains any
/// [`AUTOMATION_MARKERS`] entry. Purely in-memory.
#[derive(Debug, Default)]
pub struct UserAgentCheck;

impl UserAgentCheck {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FraudCheck for UserAgentCheck {
    fn name(&self) -> &'static str {
        "ua_blocklist"
    }

    async fn check(&self, visit: &Visit) -> FraudVerdict {
        let Some(user_agent) = visit.user_agent.as_deref() else {
            return FraudVerdict::pass("user_agent not provided");
        };

        let user_agent = user_agent.to_lowercase();
        if AUTOMATION_MARKERS.iter().any(|m| user_agent.contains(m)) {
            FraudVerdict::block("ua_blocklist: user-agent matches blocked pattern")
        } else {
            FraudVerdict::pass("ua_blocklist: user-agent not blocked")
        }
    }
}
