//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Forward request:
//!     → headers.rs (strip hop-by-hop, append X-Forwarded-For)
//! Upstream response:
//!     → headers.rs (strip hop-by-hop)
//! ```

pub mod headers;

pub use headers::{is_hop_by_hop, HOP_BY_HOP_HEADERS, X_FORWARDED_FOR};
