//! Command-line interface.
//!
//! # Responsibilities
//! - Define the flag surface with clap
//! - Reject `-u` given more than once before clap merges the occurrences
//! - Convert parsed flags into a validated ProxyConfig

use clap::Parser;

use crate::config::schema::{
    ListenerConfig, ObservabilityConfig, ProxyConfig, TimeoutConfig, TlsConfig,
    DEFAULT_BIND_ADDRESS, DEFAULT_BUFFER_SIZE, DEFAULT_REQUEST_SECS,
};
use crate::config::validation::{validate_config, ValidationError};

#[derive(Parser, Debug)]
#[command(name = "vhost-proxy", version)]
#[command(about = "reverse proxy one or more http upstreams behind a wildcard certificate")]
pub struct Cli {
    /// Listen address (host:port, empty host binds all interfaces)
    #[arg(short = 'a', long = "addr", default_value = DEFAULT_BIND_ADDRESS)]
    pub addr: String,

    /// Per-request upstream timeout in seconds
    #[arg(short = 't', long = "timeout", default_value_t = DEFAULT_REQUEST_SECS)]
    pub timeout: u64,

    /// TLS certificate path (PEM)
    #[arg(short = 'c', long = "ssl-cert", default_value = "")]
    pub ssl_cert: String,

    /// TLS private key path (PEM)
    #[arg(short = 'k', long = "ssl-key", default_value = "")]
    pub ssl_key: String,

    /// may specify multiple upstreams: -u a.foo.com=localhost:8080 b.foo.com=localhost:8081
    #[arg(short = 'u', long = "upstream", num_args = 1..)]
    pub upstream: Vec<String>,

    /// HTTP server read buffer size in bytes
    #[arg(short = 'b', long = "buffer", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer: usize,

    /// Expose Prometheus metrics on this address
    #[arg(long = "metrics-addr")]
    pub metrics_addr: Option<String>,
}

/// Error type for command-line handling.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(
        "do not specify -u multiple times, specify it once with space separated values\n\
         example: vhost-proxy -u foo.com=localhost:8080 bar.com=localhost:8081"
    )]
    RepeatedUpstreamFlag,

    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Cli> for ProxyConfig {
    fn from(cli: Cli) -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: cli.addr,
                tls: TlsConfig::from_paths(&cli.ssl_cert, &cli.ssl_key),
                buffer_size: cli.buffer,
            },
            timeouts: TimeoutConfig {
                request_secs: cli.timeout,
            },
            upstreams: cli.upstream,
            observability: ObservabilityConfig {
                metrics_address: cli.metrics_addr,
            },
        }
    }
}

/// Count how many times the upstream flag appears in argv.
///
/// The first element is the program name and is skipped. Counting stops at `--`.
pub fn count_upstream_flags<S: AsRef<str>>(args: &[S]) -> usize {
    args.iter()
        .skip(1)
        .map(|arg| arg.as_ref())
        .take_while(|arg| *arg != "--")
        .filter(|arg| {
            *arg == "--upstream" || arg.starts_with("--upstream=") || arg.starts_with("-u")
        })
        .count()
}

/// Parse argv into a validated configuration.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<ProxyConfig, CliError> {
    if count_upstream_flags(args) > 1 {
        return Err(CliError::RepeatedUpstreamFlag);
    }

    let cli = Cli::try_parse_from(args.iter().map(|arg| arg.as_ref()))?;
    let config = ProxyConfig::from(cli);
    validate_config(&config).map_err(CliError::Invalid)?;
    Ok(config)
}
