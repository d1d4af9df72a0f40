//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, connect info, buffers)
//!     → forward.rs (resolve virtual host, drive the pipeline)
//!     → request.rs (rewrite authority/scheme, scrub headers, add XFF)
//!     → client.rs (dispatch upstream under one deadline)
//!     → response.rs (scrub headers, copy status and body)
//!     → Send to client
//! ```

pub mod client;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use client::{UpstreamClient, UpstreamError};
pub use forward::{ForwardError, ForwardingEngine};
pub use server::{HttpServer, ServerError};
