//! Identity blocklist checks, one per identity class.

use async_trait::async_trait;
use std::sync::Arc;

use super::{FraudCheck, FraudVerdict};
use crate::domain::entities::Visit;
use crate::domain::repositories::BlocklistRepository;

/// Identity class inspected by an [`IdentityBlocklistCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    UserId,
    Gaid,
    Idfa,
}

impl IdentityKind {
    /// Field name as it appears in requests and reasons.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::Gaid => "gaid",
            Self::Idfa => "idfa",
        }
    }

    pub fn check_name(&self) -> &'static str {
        match self {
            Self::UserId => "user_id_blocklist",
            Self::Gaid => "gaid_blocklist",
            Self::Idfa => "idfa_blocklist",
        }
    }

    fn value<'a>(&self, visit: &'a Visit) -> Option<&'a str> {
        match self {
            Self::UserId => Some(visit.user_id.as_str()).filter(|s| !s.is_empty()),
            Self::Gaid => visit.gaid.as_deref(),
            Self::Idfa => visit.idfa.as_deref(),
        }
    }
}

/// Blocks when the visit's identity of the configured kind is blocklisted.
pub struct IdentityBlocklistCheck {
    kind: IdentityKind,
    blocklist: Arc<dyn BlocklistRepository>,
}

impl IdentityBlocklistCheck {
    pub fn new(kind: IdentityKind, blocklist: Arc<dyn BlocklistRepository>) -> Self {
        Self { kind, blocklist }
    }
}

#[async_trait]
impl FraudCheck for IdentityBlocklistCheck {
    fn name(&self) -> &'static str {
        self.kind.check_name()
    }

    async fn check(&self, visit: &Visit) -> FraudVerdict {
        let field = self.kind.field();
        let Some(value) = self.kind.value(visit) else {
            return FraudVerdict::pass(format!("{field} not provided"));
        };

        match self.blocklist.is_blocked(value).await {
            Ok(true) => FraudVerdict::block(format!("{}: {field} is in blocklist", self.name())),
            Ok(false) => FraudVerdict::pass(format!("{}: {field} not in blocklist", self.name())),
            Err(_) => FraudVerdict::pass(format!("error checking {field} blocklist")),
        }
    }
}
