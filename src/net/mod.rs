//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → listener.rs (resolve address, bind IPv4 socket)
//!     → tls.rs (optional: load PEM cert/key into rustls)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Binding happens before serving so failures are fatal at startup
//! - TLS is optional and handled transparently by the acceptor

pub mod listener;
pub mod tls;

pub use listener::{bind, ListenerError};
pub use tls::{load_tls_config, TlsError};
