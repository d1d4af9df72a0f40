//! Forward request construction.
//!
//! # Responsibilities
//! - Rebuild the inbound request as the request sent upstream
//! - Point the URI and Host header at the upstream authority, scheme `http`
//! - Strip hop-by-hop headers and append X-Forwarded-For
//! - Read the client's body in full before the upstream exchange begins
//!
//! # Design Decisions
//! - The inbound request is consumed; the peer address is captured by the
//!   caller beforehand so client identity survives the rewrite
//! - Method, path, query and body pass through untouched
//! - Always HTTP/1.1 towards the upstream
//! - A slow client upload is not charged to the upstream deadline

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderValue, Request, Uri, Version};
use http_body_util::BodyExt;

use crate::security::headers::{append_forwarded_for, strip_hop_by_hop};

/// Rewrite `request` so it can be sent to `upstream`.
pub fn build_forward_request(
    request: Request<Body>,
    upstream: &Authority,
    peer: Option<SocketAddr>,
) -> Result<Request<Body>, axum::http::Error> {
    let (mut parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .cloned()
        .unwrap_or_else(|| PathAndQuery::from_static("/"));

    parts.uri = Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(upstream.clone())
        .path_and_query(path_and_query)
        .build()?;
    parts.version = Version::HTTP_11;

    strip_hop_by_hop(&mut parts.headers);
    parts
        .headers
        .insert(header::HOST, HeaderValue::from_str(upstream.as_str())?);

    if let Some(peer) = peer {
        append_forwarded_for(&mut parts.headers, peer.ip());
    }

    Ok(Request::from_parts(parts, body))
}

/// Read the whole inbound body into memory.
pub async fn buffer_body(request: Request<Body>) -> Result<Request<Body>, axum::Error> {
    let (parts, body) = request.into_parts();
    let bytes = body.collect().await?.to_bytes();
    Ok(Request::from_parts(parts, Body::from(bytes)))
}
