//! vhost-proxy
//!
//! Reverse proxies one or more HTTP upstreams behind a single wildcard
//! certificate, choosing the upstream from the request's Host header.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 VHOST PROXY                  │
//!                         │                                              │
//!     Client Request      │  ┌─────────┐   ┌─────────┐   ┌───────────┐  │
//!     ────────────────────┼─▶│   net   │──▶│  http   │──▶│  routing  │  │
//!                         │  │listener │   │ server  │   │   table   │  │
//!                         │  │ + tls   │   └─────────┘   └─────┬─────┘  │
//!                         │  └─────────┘                       │        │
//!                         │                                    ▼        │
//!     Client Response     │  ┌─────────┐   ┌─────────┐   ┌───────────┐  │
//!     ◀───────────────────┼──│response │◀──│  http   │◀──│  forward  │◀─┼──── Upstream
//!                         │  │  scrub  │   │ client  │   │  request  │  │
//!                         │  └─────────┘   └─────────┘   └───────────┘  │
//!                         │                                              │
//!                         │  config · observability · resilience ·       │
//!                         │  security · lifecycle                        │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use vhost_proxy::config::{self, CliError};
use vhost_proxy::lifecycle::startup;
use vhost_proxy::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    let args: Vec<String> = std::env::args().collect();
    let config = match config::parse_args(&args) {
        Ok(config) => config,
        Err(CliError::Args(e)) if !e.use_stderr() => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(CliError::Args(e)) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::error!("fatal: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("vhost-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = startup::run(config).await {
        tracing::error!("fatal: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
