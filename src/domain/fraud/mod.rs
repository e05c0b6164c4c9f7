//! Rule-based fraud pipeline.
//!
//! A [`FraudPipeline`] owns an ordered list of [`FraudCheck`]s and runs every
//! one of them against a [`Visit`]. Checks never short-circuit each other and
//! never block a visit they could not evaluate: a missing signal or a storage
//! error yields a non-blocking verdict whose reason describes what happened.
//!
//! # Checks (registration order)
//!
//! 1. [`IpRateLimitCheck`] - too many recent clicks from the same origin
//! 2. [`UserAgentCheck`] - agent string carries an automation marker
//! 3. [`IdentityBlocklistCheck`] for user id, GAID and IDFA, in that order

pub mod identity_blocklist;
pub mod ip_rate_limit;
pub mod user_agent;

pub use identity_blocklist::{IdentityBlocklistCheck, IdentityKind};
pub use ip_rate_limit::IpRateLimitCheck;
pub use user_agent::UserAgentCheck;

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use crate::domain::entities::Visit;
use crate::domain::repositories::{BlocklistRepository, ClickRepository};

/// Outcome of a single check for a single visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudVerdict {
    pub blocked: bool,
    pub reason: String,
}

impl FraudVerdict {
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            blocked: true,
            reason: reason.into(),
        }
    }

    pub fn pass(reason: impl Into<String>) -> Self {
        Self {
            blocked: false,
            reason: reason.into(),
        }
    }
}

/// A single read-only predicate over one signal of a visit.
#[async_trait]
pub trait FraudCheck: Send + Sync {
    /// Stable identifier used in logs and ordering tests.
    fn name(&self) -> &'static str;

    /// Evaluates the visit. Must not fail: errors become passing verdicts.
    async fn check(&self, visit: &Visit) -> FraudVerdict;
}

/// Thresholds for the fraud decision.
///
/// Both thresholds are operator policy, loaded from configuration.
#[derive(Debug, Clone)]
pub struct FraudPolicy {
    /// Number of blocking verdicts at which a click becomes fraud.
    pub block_threshold: usize,
    /// Clicks from one origin within `rate_limit_window` that trigger a block.
    pub rate_limit_max_clicks: i64,
    pub rate_limit_window: Duration,
}

impl Default for FraudPolicy {
    fn default() -> Self {
        Self {
            block_threshold: 2,
            rate_limit_max_clicks: 100,
            rate_limit_window: Duration::seconds(60),
        }
    }
}

/// Verdict of one named check inside a [`FraudReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: &'static str,
    pub verdict: FraudVerdict,
}

/// Aggregate of all verdicts for one visit.
#[derive(Debug, Clone, Default)]
pub struct FraudReport {
    pub outcomes: Vec<CheckOutcome>,
    pub block_count: usize,
}

impl FraudReport {
    /// Reasons of the blocking verdicts, in check order.
    pub fn blocking_reasons(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.verdict.blocked)
            .map(|o| o.verdict.reason.clone())
            .collect()
    }

    pub fn exceeds(&self, block_threshold: usize) -> bool {
        self.block_count >= block_threshold
    }
}

/// Ordered set of fraud checks.
pub struct FraudPipeline {
    checks: Vec<Box<dyn FraudCheck>>,
}

impl FraudPipeline {
    /// Creates a pipeline that runs `checks` in the given order.
    pub fn new(checks: Vec<Box<dyn FraudCheck>>) -> Self {
        Self { checks }
    }

    /// Builds the production pipeline with every check registered.
    pub fn standard(
        clicks: Arc<dyn ClickRepository>,
        blocklist: Arc<dyn BlocklistRepository>,
        policy: &FraudPolicy,
    ) -> Self {
        Self::new(vec![
            Box::new(IpRateLimitCheck::new(
                clicks,
                policy.rate_limit_max_clicks,
                policy.rate_limit_window,
            )),
            Box::new(UserAgentCheck::new()),
            Box::new(IdentityBlocklistCheck::new(
                IdentityKind::UserId,
                blocklist.clone(),
            )),
            Box::new(IdentityBlocklistCheck::new(
                IdentityKind::Gaid,
                blocklist.clone(),
            )),
            Box::new(IdentityBlocklistCheck::new(IdentityKind::Idfa, blocklist)),
        ])
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Runs every check sequentially and counts the blocking verdicts.
    pub async fn run(&self, visit: &Visit) -> FraudReport {
        let mut report = FraudReport {
            outcomes: Vec::with_capacity(self.checks.len()),
            block_count: 0,
        };

        for check in &self.checks {
            let verdict = check.check(visit).await;
            if verdict.blocked {
                report.block_count += 1;
            }
            report.outcomes.push(CheckOutcome {
                check: check.name(),
                verdict,
            });
        }

        report
    }
}
