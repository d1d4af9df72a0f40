//! Header manipulation for relayed messages.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from forwarded requests and relayed responses
//! - Append X-Forwarded-For with the immediate peer address
//!
//! # Design Decisions
//! - The hop-by-hop set is a fixed list; headers named inside `Connection`
//!   are not removed
//! - X-Forwarded-For is appended as its own occurrence, never merged into
//!   an existing value

use std::net::IpAddr;

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// `X-Forwarded-For` header name.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Headers that only apply to a single transport hop.
pub static HOP_BY_HOP_HEADERS: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("proxy-connection"),
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Returns true if `name` is a hop-by-hop header, ignoring case.
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| hop.as_str().eq_ignore_ascii_case(name))
}

/// Remove every occurrence of every hop-by-hop header.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP_HEADERS {
        // HeaderMap::remove drops all values stored under the name.
        headers.remove(name);
    }
}

/// Append the peer IP as a new X-Forwarded-For occurrence.
pub fn append_forwarded_for(headers: &mut HeaderMap, client_ip: IpAddr) {
    if let Ok(value) = HeaderValue::from_str(&client_ip.to_string()) {
        headers.append(X_FORWARDED_FOR, value);
    }
}
