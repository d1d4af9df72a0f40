//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Dial upstreams over plaintext TCP and speak HTTP/1.1
//! - Receive the complete upstream response within the request deadline
//! - Classify failures (timeout, connect/protocol, body read)
//!
//! # Design Decisions
//! - Connections are pooled by hyper-util; the deadline still bounds each exchange
//! - A request is sent at most once, even when a pooled connection turns out dead
//! - The response body is read to the end inside the deadline, so a stalled
//!   body is a timeout rather than a truncated relay

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{response, Request};
use http_body_util::BodyExt;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::resilience::{Deadline, DeadlineExceeded};

/// Failure of one upstream exchange. Every variant maps to `500` for the client.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream did not respond before timeout: {0}")]
    Timeout(#[from] DeadlineExceeded),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read upstream response body: {0}")]
    Body(#[from] hyper::Error),
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }
}

/// A fully received upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub head: response::Parts,
    pub body: Bytes,
}

/// Plaintext HTTP/1.1 client with a per-exchange deadline.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client whose exchanges are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeout));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(90))
            .retry_canceled_requests(false)
            .build(connector);

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `req` and read the whole response before the deadline.
    pub async fn send(&self, req: Request<Body>) -> Result<UpstreamResponse, UpstreamError> {
        let deadline = Deadline::after(self.timeout);
        let client = self.client.clone();

        deadline
            .run(async move {
                let response = client.request(req).await?;
                let (head, body) = response.into_parts();
                let body = body.collect().await?.to_bytes();
                Ok::<_, UpstreamError>(UpstreamResponse { head, body })
            })
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn reads_complete_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 201 Created\r\nContent-Length: 2\r\nX-Up: yes\r\n\r\nhi")
                .await;
        });

        let client = UpstreamClient::new(Duration::from_secs(2));
        let req = Request::builder()
            .uri(format!("http://{}/", addr))
            .body(Body::empty())
            .unwrap();
        let res = client.send(req).await.unwrap();
        assert_eq!(res.head.status, 201);
        assert_eq!(res.head.headers.get("x-up").unwrap(), "yes");
        assert_eq!(&res.body[..], b"hi");
    }

    #[tokio::test]
    async fn silent_upstream_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let client = UpstreamClient::new(Duration::from_millis(200));
        let req = Request::builder()
            .uri(format!("http://{}/", addr))
            .body(Body::empty())
            .unwrap();
        let err = client.send(req).await.unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn refused_connection_is_request_error() {
        // Bind then drop to get a port nobody listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let client = UpstreamClient::new(Duration::from_secs(2));
        let req = Request::builder()
            .uri(format!("http://{}/", addr))
            .body(Body::empty())
            .unwrap();
        let err = client.send(req).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Request(_)), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn failed_exchange_is_not_resent() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                // Hang up without answering.
                drop(socket);
            }
        });

        let client = UpstreamClient::new(Duration::from_secs(2));
        let req = Request::builder()
            .uri(format!("http://{}/", addr))
            .body(Body::empty())
            .unwrap();
        let err = client.send(req).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Request(_)), "unexpected error: {}", err);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }
}
