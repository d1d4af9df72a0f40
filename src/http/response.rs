//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn a received upstream response into the client response
//! - Strip hop-by-hop headers from the upstream response
//! - Build bodiless error responses
//!
//! # Design Decisions
//! - Status, remaining headers and body are copied unchanged
//! - Errors carry no body; the status code is the whole message

use axum::body::Body;
use axum::http::{Response, StatusCode};

use crate::http::client::UpstreamResponse;
use crate::security::headers::strip_hop_by_hop;

/// Convert an upstream response into the response written to the client.
pub fn relay_response(upstream: UpstreamResponse) -> Response<Body> {
    let UpstreamResponse { mut head, body } = upstream;
    strip_hop_by_hop(&mut head.headers);
    Response::from_parts(head, Body::from(body))
}

/// An empty response with only a status code.
pub fn status_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
