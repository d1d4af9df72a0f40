//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Values are produced once by the CLI layer and never mutated afterwards.

use std::path::PathBuf;
use std::time::Duration;

/// Default listen address: all IPv4 interfaces, HTTPS port.
pub const DEFAULT_BIND_ADDRESS: &str = ":443";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_SECS: u64 = 5;

/// Default HTTP/1 read buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 16_384;

/// hyper refuses HTTP/1 read buffers smaller than this.
pub const MIN_BUFFER_SIZE: usize = 8192;

/// Root configuration for the reverse proxy.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, TLS, buffers).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Raw `host=authority` upstream entries, in command-line order.
    pub upstreams: Vec<String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., ":443" or "127.0.0.1:8443").
    pub bind_address: String,

    /// Optional TLS configuration. `None` means plaintext.
    pub tls: Option<TlsConfig>,

    /// Read buffer size for inbound HTTP/1 connections.
    pub buffer_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            tls: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ListenerConfig {
    /// Read buffer size handed to hyper, raised to `MIN_BUFFER_SIZE` when smaller.
    pub fn read_buffer_size(&self) -> usize {
        self.buffer_size.max(MIN_BUFFER_SIZE)
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

impl TlsConfig {
    /// TLS is only enabled when both a certificate and a key are given.
    /// A lone certificate or a lone key falls back to plaintext.
    pub fn from_paths(cert_path: &str, key_path: &str) -> Option<Self> {
        if cert_path.is_empty() || key_path.is_empty() {
            return None;
        }
        Some(Self {
            cert_path: PathBuf::from(cert_path),
            key_path: PathBuf::from(key_path),
        })
    }
}

/// Timeout configuration for upstream exchanges.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Deadline for connect + send + receive of one upstream exchange, in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_SECS,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Prometheus scrape endpoint bind address. Metrics export is off when unset.
    pub metrics_address: Option<String>,
}
