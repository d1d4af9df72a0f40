//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap the whole upstream exchange in one wall-clock deadline
//! - Cancel the in-flight exchange cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - One deadline spans connect, send and receive; phases do not get their own budgets
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// The deadline passed before the wrapped operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline of {0:?} exceeded")]
pub struct DeadlineExceeded(pub Duration);

/// A fixed point in time by which an upstream exchange must complete.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start a deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    /// The total budget this deadline was created with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Run `fut` to completion unless the deadline passes first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, DeadlineExceeded> {
        tokio::time::timeout_at(self.at, fut)
            .await
            .map_err(|_| DeadlineExceeded(self.budget))
    }
}
