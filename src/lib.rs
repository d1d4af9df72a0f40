//! Host-routed reverse proxy library.
//!
//! Terminates TLS with a single (typically wildcard) certificate and forwards
//! each request to the plaintext HTTP upstream configured for its Host header.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::RoutingTable;
