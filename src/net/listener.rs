//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured listen address (`:443`, `host:port`)
//! - Bind an IPv4 TCP socket ready for the async acceptor
//!
//! # Design Decisions
//! - An empty host means every IPv4 interface
//! - Hostnames are resolved once at startup; the first IPv4 address wins
//! - Bind failures are fatal and reported before any traffic is accepted

use std::net::{Ipv4Addr, SocketAddr, TcpListener, ToSocketAddrs};

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The address could not be parsed or resolved to IPv4.
    #[error("invalid listen address {address:?}: {reason}")]
    Address { address: String, reason: String },

    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve a listen address to a concrete IPv4 socket address.
pub fn resolve_listen_addr(address: &str) -> Result<SocketAddr, ListenerError> {
    let invalid = |reason: String| ListenerError::Address {
        address: address.to_string(),
        reason,
    };

    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| invalid("missing port".to_string()))?;
    let port: u16 = port
        .parse()
        .map_err(|_| invalid(format!("invalid port {:?}", port)))?;

    if host.is_empty() {
        return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
    }

    (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| invalid("no IPv4 address".to_string()))
}

/// Bind a non-blocking TCP listener on `address`.
pub fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    let addr = resolve_listen_addr(address)?;
    let listener = TcpListener::bind(addr).map_err(|source| ListenerError::Bind {
        address: addr,
        source,
    })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| ListenerError::Bind {
            address: addr,
            source,
        })?;

    tracing::debug!(address = %addr, "Listener bound");
    Ok(listener)
}
