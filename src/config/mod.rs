//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! argv
//!     → cli.rs (repeated -u check, clap parse)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to startup, shared read-only afterwards
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload
//! - Defaults live next to the schema and are reused by the CLI
//! - Validation separates syntactic (clap) from semantic checks

pub mod cli;
pub mod schema;
pub mod validation;

pub use cli::{parse_args, Cli, CliError};
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProxyConfig;
pub use schema::TimeoutConfig;
pub use schema::TlsConfig;
pub use validation::{validate_config, ValidationError};
