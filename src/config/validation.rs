//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles syntactic)
//! - Validate value ranges (timeout > 0)
//! - Validate every upstream entry
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the listener is bound

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;
use crate::routing::{RouteError, UpstreamEntry};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("listen address must not be empty")]
    EmptyBindAddress,

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),

    #[error(transparent)]
    Upstream(#[from] RouteError),
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    for entry in &config.upstreams {
        if let Err(e) = entry.parse::<UpstreamEntry>() {
            errors.push(e.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
