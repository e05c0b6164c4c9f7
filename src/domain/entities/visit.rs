//! Per-request visit data decoded from a tracking request.

/// One inbound visit to a tracking link.
///
/// Exists only for the duration of a single request. `user_id` is required
/// by the orchestrator; an empty string means it was not supplied. All other
/// signals are optional and empty inputs are normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    pub link_id: String,
    pub user_id: String,
    pub gaid: Option<String>,
    pub idfa: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl Visit {
    /// Creates a visit, dropping empty optional values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let visit = Visit::new(
    ///     "7f1c0a52-0b7e-4a8e-9a3f-0d6c1b2a3e4f".to_string(),
    ///     "u1".to_string(),
    ///     Some("gaid-1"),
    ///     None,
    ///     Some("10.0.0.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     None,
    /// );
    /// ```
    pub fn new(
        link_id: String,
        user_id: String,
        gaid: Option<&str>,
        idfa: Option<&str>,
        ip: Option<String>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            user_id,
            gaid: non_empty(gaid),
            idfa: non_empty(idfa),
            ip: ip.filter(|s| !s.is_empty()),
            user_agent: non_empty(user_agent),
            referrer: non_empty(referrer),
        }
    }

    pub fn has_user_id(&self) -> bool {
        !self.user_id.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}
