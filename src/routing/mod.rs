//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (Host header)
//!     → matcher.rs (extract host, strip port)
//!     → router.rs (exact host lookup)
//!     → Return: upstream authority or miss
//!
//! Table construction (at startup):
//!     "host=authority" entries
//!     → parse and validate each entry
//!     → freeze as immutable RoutingTable
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - Exact match only; no wildcards, no path routing
//! - Explicit miss rather than silent default

pub mod matcher;
pub mod router;

pub use matcher::{request_host, virtual_host};
pub use router::{RouteError, RoutingTable, UpstreamEntry};
