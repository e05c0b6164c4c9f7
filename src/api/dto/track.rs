//! Query parameters of the tracking endpoint.

/// Query string of `GET /track/{link_id}`.
///
/// Absent parameters decode as empty strings, which downstream code treats
/// the same as "not supplied".
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TrackQuery {
    pub user_id: String,
    pub gaid: String,
    pub idfa: String,
}

impl TrackQuery {
    /// Decodes a raw query string.
    ///
    /// Decoding never fails: the first value of a repeated key wins, unknown
    /// keys are ignored and an undecodable query yields empty values.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = raw
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default();

        let mut query = Self::default();
        let mut seen = [false; 3];

        for (key, value) in pairs {
            let (slot, field) = match key.as_str() {
                "user_id" => (0, &mut query.user_id),
                "gaid" => (1, &mut query.gaid),
                "idfa" => (2, &mut query.idfa),
                _ => continue,
            };
            if !seen[slot] {
                seen[slot] = true;
                *field = value;
            }
        }

        query
    }
}
