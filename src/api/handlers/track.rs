//! Handler for tracking link visits.

use axum::{
    extract::{ConnectInfo, Path, RawQuery, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::warn;

use crate::api::dto::track::TrackQuery;
use crate::application::services::TrackResponse;
use crate::domain::entities::Visit;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Decides the outcome of one visit to a tracking link.
///
/// # Endpoint
///
/// `GET /track/{link_id}?user_id=...&gaid=...&idfa=...`
///
/// # Request Signals
///
/// - `user_id` (required), `gaid`, `idfa` from the query string; the first
///   value of a repeated key wins
/// - Origin address from the first `X-Forwarded-For` entry, else the peer
/// - `User-Agent` and `Referer` headers
///
/// # Response Codes
///
/// - **302 Found**: Clean click, `Location` is the substituted destination
/// - **200 OK**: "campaign not available" for unknown links, unavailable
///   campaigns and fraud alike
/// - **400 Bad Request**: `user_id` missing or empty
pub async fn track_handler(
    Path(link_id): Path<String>,
    RawQuery(raw_query): RawQuery,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> TrackResponse {
    let query = TrackQuery::from_raw(raw_query.as_deref());

    let visit = Visit::new(
        link_id,
        query.user_id,
        Some(query.gaid.as_str()),
        Some(query.idfa.as_str()),
        client_ip(&headers, Some(addr)),
        header_str(&headers, header::USER_AGENT),
        header_str(&headers, header::REFERER),
    );

    state.click_service.handle_click(visit).await
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

impl IntoResponse for TrackResponse {
    fn into_response(self) -> Response {
        let content_type = if self.is_html() {
            "text/html; charset=utf-8"
        } else {
            "text/plain; charset=utf-8"
        };

        let mut response = (
            self.status(),
            [(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
            self.body(),
        )
            .into_response();

        if let Some(location) = self.location() {
            match HeaderValue::from_bytes(location.as_bytes()) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(_) => warn!(location, "Destination is not a valid Location header"),
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_redirect_response_headers() {
        let response = TrackResponse::Redirect {
            location: "https://ex.com/?u=u1".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://ex.com/?u=u1"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_values_missing_is_plain_text() {
        let response = TrackResponse::ValuesMissing.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_not_available_has_no_location() {
        let response = TrackResponse::NotAvailable.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_unrepresentable_location_is_omitted() {
        let response = TrackResponse::Redirect {
            location: "https://ex.com/\n".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}
