//! Virtual host extraction.
//!
//! # Responsibilities
//! - Read the Host header, falling back to the URI authority
//! - Strip any `:port` suffix
//!
//! # Design Decisions
//! - No lowercasing and no IDN normalization; the host is used as sent
//! - Split on the first ':' only

use axum::http::{header, Request};

/// Strip a `:port` suffix from a Host header value.
pub fn virtual_host(host: &str) -> &str {
    match host.split_once(':') {
        Some((name, _)) => name,
        None => host,
    }
}

/// The port-stripped virtual host a request is addressed to.
///
/// Returns an empty string when the request names no host at all, which
/// never matches a configured upstream.
pub fn request_host<B>(req: &Request<B>) -> &str {
    let raw = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .unwrap_or("");
    virtual_host(raw)
}
