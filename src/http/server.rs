//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the forwarding handler as fallback
//! - Serve plaintext or TLS on an already-bound listener
//! - Speak HTTP/1.1 only, with the configured read buffer size
//! - Expose peer addresses to the handler via connect info
//! - Drain connections when the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, Response},
    Router,
};
use axum_server::Handle;
use hyper_util::rt::TokioExecutor;
use hyper_util::server::conn::auto::Builder;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::forward::ForwardingEngine;
use crate::net::tls::{load_tls_config, TlsError};
use crate::routing::RoutingTable;

/// How long in-flight connections get to finish after shutdown is signalled.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Error type for a running server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the reverse proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server forwarding according to `routes`.
    pub fn new(config: ProxyConfig, routes: Arc<RoutingTable>) -> Self {
        let engine = ForwardingEngine::new(routes, config.timeouts.request_timeout());
        let router = Self::build_router(engine);
        Self { router, config }
    }

    fn build_router(engine: ForwardingEngine) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(engine)
            .layer(TraceLayer::new_for_http())
    }

    /// The application router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: std::net::TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        let buffer_size = self.config.listener.read_buffer_size();
        if buffer_size != self.config.listener.buffer_size {
            tracing::warn!(
                requested = self.config.listener.buffer_size,
                using = buffer_size,
                "Read buffer size below minimum, raising"
            );
        }

        let handle = Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining connections");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        match &self.config.listener.tls {
            Some(tls) => {
                let rustls_config = load_tls_config(&tls.cert_path, &tls.key_path).await?;
                tracing::info!(
                    "serve tls: {} {} {}",
                    tls.key_path.display(),
                    tls.cert_path.display(),
                    addr
                );
                let mut server = axum_server::from_tcp_rustls(listener, rustls_config).handle(handle);
                configure_http1(server.http_builder(), buffer_size);
                server.serve(app).await?;
            }
            None => {
                tracing::info!("serve: {}", addr);
                let mut server = axum_server::from_tcp(listener).handle(handle);
                configure_http1(server.http_builder(), buffer_size);
                server.serve(app).await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Restrict inbound connections to HTTP/1.1 and size their read buffer.
fn configure_http1(builder: &mut Builder<TokioExecutor>, buffer_size: usize) {
    let auto = std::mem::replace(builder, Builder::new(TokioExecutor::new()));
    *builder = auto.http1_only();
    builder.http1().max_buf_size(buffer_size);
}

/// Fallback handler: every request goes through the forwarding engine.
async fn proxy_handler(State(engine): State<ForwardingEngine>, request: Request<Body>) -> Response<Body> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    engine.handle(request, peer).await
}
