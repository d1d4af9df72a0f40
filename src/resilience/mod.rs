//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (one deadline for connect + send + receive)
//!     → On expiry: the exchange is dropped and reported as a timeout
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - No retries: a failed exchange is reported once

pub mod timeouts;

pub use timeouts::{Deadline, DeadlineExceeded};
