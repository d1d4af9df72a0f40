//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the routing table from the validated configuration
//! - Start the optional metrics endpoint
//! - Bind the listener and begin accepting traffic
//! - Wire OS signals to graceful shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::observability::metrics;
use crate::routing::{RouteError, RoutingTable};

/// Error type for anything that stops the proxy from serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Routes(#[from] RouteError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Start the proxy and serve until a termination signal arrives.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let routes = Arc::new(RoutingTable::build(&config.upstreams)?);

    if let Some(addr) = &config.observability.metrics_address {
        match addr.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(address = %addr, error = %e, "Invalid metrics address"),
        }
    }

    let listener = net::bind(&config.listener.bind_address)?;

    tracing::info!(
        upstreams = routes.len(),
        timeout_secs = config.timeouts.request_secs,
        buffer_size = config.listener.buffer_size,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, routes)
        .run(listener, server_shutdown)
        .await?;

    Ok(())
}
