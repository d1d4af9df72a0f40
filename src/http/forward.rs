//! Forwarding engine.
//!
//! # Pipeline
//! ```text
//! Idle
//!     → Resolved   (Host header, port stripped, found in routing table)
//!     → Buffered   (client body read in full)
//!     → Dispatched (forward request rebuilt and sent with a deadline)
//!     → Relayed    (hop-by-hop headers stripped, response copied)
//!     | Errored    (404 on routing miss, 500 on any upstream failure)
//! ```
//!
//! Each request runs the pipeline on its own task. No state is shared
//! between requests apart from the read-only routing table and the
//! upstream connection pool.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::uri::Authority;
use axum::http::{Method, Request, Response, StatusCode, Uri};

use crate::http::client::{UpstreamClient, UpstreamError};
use crate::http::request::{buffer_body, build_forward_request};
use crate::http::response::{relay_response, status_response};
use crate::observability::metrics;
use crate::routing::{request_host, RoutingTable};

/// Why a request could not be relayed.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("no upstream available for host: {0}")]
    NoUpstream(String),

    #[error("failed to read client request body: {0}")]
    ClientBody(#[source] axum::Error),

    #[error("could not build forward request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("{source} ({uri})")]
    Upstream {
        uri: Uri,
        #[source]
        source: UpstreamError,
    },
}

impl ForwardError {
    /// Status code written to the client for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::NoUpstream(_) => StatusCode::NOT_FOUND,
            ForwardError::ClientBody(_)
            | ForwardError::Request(_)
            | ForwardError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// A successfully relayed exchange.
#[derive(Debug)]
pub struct Relayed {
    pub method: Method,
    pub uri: Uri,
    pub upstream: Authority,
    pub response: Response<Body>,
}

/// Per-request pipeline from virtual host to upstream and back.
#[derive(Clone)]
pub struct ForwardingEngine {
    routes: Arc<RoutingTable>,
    client: UpstreamClient,
}

impl ForwardingEngine {
    pub fn new(routes: Arc<RoutingTable>, timeout: Duration) -> Self {
        Self {
            routes,
            client: UpstreamClient::new(timeout),
        }
    }

    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    /// Handle one request end to end. Never fails; errors become status codes.
    pub async fn handle(&self, request: Request<Body>, peer: Option<SocketAddr>) -> Response<Body> {
        let start = Instant::now();
        let method = request.method().clone();

        match self.forward(request, peer).await {
            Ok(relayed) => {
                let status = relayed.response.status();
                tracing::info!("{} {} {}", status.as_u16(), relayed.method, relayed.uri);
                metrics::record_request(
                    relayed.method.as_str(),
                    status.as_u16(),
                    relayed.upstream.as_str(),
                    start,
                );
                relayed.response
            }
            Err(e) => {
                tracing::error!("err: {}", e);
                let status = e.status();
                let upstream = match &e {
                    ForwardError::Upstream { uri, .. } => {
                        uri.authority().map(|a| a.as_str()).unwrap_or("none")
                    }
                    _ => "none",
                };
                metrics::record_request(method.as_str(), status.as_u16(), upstream, start);
                status_response(status)
            }
        }
    }

    /// Run the pipeline, reporting failures to the caller.
    pub async fn forward(
        &self,
        request: Request<Body>,
        peer: Option<SocketAddr>,
    ) -> Result<Relayed, ForwardError> {
        let host = request_host(&request);
        let upstream = self
            .routes
            .lookup(host)
            .cloned()
            .ok_or_else(|| ForwardError::NoUpstream(host.to_string()))?;

        // The upstream deadline starts only once the client body is in hand.
        let request = buffer_body(request).await.map_err(ForwardError::ClientBody)?;
        let forward = build_forward_request(request, &upstream, peer)?;
        let method = forward.method().clone();
        let uri = forward.uri().clone();

        tracing::debug!(method = %method, uri = %uri, "Dispatching to upstream");

        let received = match self.client.send(forward).await {
            Ok(received) => received,
            Err(source) => return Err(ForwardError::Upstream { uri, source }),
        };

        Ok(Relayed {
            method,
            uri,
            upstream,
            response: relay_response(received),
        })
    }
}
