//! Origin address resolution for tracking requests.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Returns the address a visit originated from.
///
/// Prefers the first entry of `X-Forwarded-For`, trimmed, since proxies
/// append hops to the right. Falls back to the peer address of the TCP
/// connection when the header is absent, empty or not valid UTF-8.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match forwarded {
        Some(ip) => Some(ip.to_string()),
        None => peer.map(|addr| addr.ip().to_string()),
    }
}
