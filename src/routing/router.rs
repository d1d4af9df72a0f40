//! Virtual host lookup.
//!
//! # Responsibilities
//! - Parse `host=authority` upstream entries
//! - Store the host → upstream authority mapping
//! - Look up the upstream for a virtual host or report an explicit miss
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) host lookup via HashMap
//! - Keys are matched exactly as configured, case included
//! - Duplicate hosts: the last entry wins

use std::collections::HashMap;
use std::str::FromStr;

use hyper::http::uri::Authority;

/// Error raised for a malformed upstream entry. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("upstream entry {0:?} is missing '=' (expected host=authority)")]
    MissingSeparator(String),

    #[error("upstream entry {0:?} has an empty host")]
    EmptyHost(String),

    #[error("upstream entry {0:?} has an empty authority")]
    EmptyAuthority(String),

    #[error("upstream entry {0:?}: host must be a bare hostname without port or scheme")]
    InvalidHost(String),

    #[error("upstream entry {0:?}: authority must be host:port")]
    InvalidAuthority(String),
}

/// One parsed `host=authority` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEntry {
    pub host: String,
    pub authority: Authority,
}

impl FromStr for UpstreamEntry {
    type Err = RouteError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (host, authority) = entry
            .split_once('=')
            .ok_or_else(|| RouteError::MissingSeparator(entry.to_string()))?;

        if host.is_empty() {
            return Err(RouteError::EmptyHost(entry.to_string()));
        }
        if authority.is_empty() {
            return Err(RouteError::EmptyAuthority(entry.to_string()));
        }
        if host.contains([':', '/']) {
            return Err(RouteError::InvalidHost(entry.to_string()));
        }

        let authority = Authority::from_str(authority)
            .map_err(|_| RouteError::InvalidAuthority(entry.to_string()))?;
        if authority.port_u16().is_none() || authority.host().is_empty() {
            return Err(RouteError::InvalidAuthority(entry.to_string()));
        }

        Ok(Self {
            host: host.to_string(),
            authority,
        })
    }
}

/// Static mapping from virtual host to upstream authority.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    upstreams: HashMap<String, Authority>,
}

impl RoutingTable {
    /// Build the table from raw `host=authority` entries.
    ///
    /// Fails on the first malformed entry.
    pub fn build<I, S>(entries: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut upstreams = HashMap::new();
        for entry in entries {
            let UpstreamEntry { host, authority } = entry.as_ref().parse()?;
            tracing::info!("upstream: {} => {}", host, authority);
            if let Some(previous) = upstreams.insert(host.clone(), authority) {
                tracing::warn!(
                    host = %host,
                    replaced = %previous,
                    "Duplicate upstream host, last entry wins"
                );
            }
        }
        Ok(Self { upstreams })
    }

    /// Look up the upstream authority for a bare virtual host.
    pub fn lookup(&self, host: &str) -> Option<&Authority> {
        self.upstreams.get(host)
    }

    /// Iterate over all configured mappings.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Authority)> {
        self.upstreams.iter().map(|(host, authority)| (host.as_str(), authority))
    }

    pub fn len(&self) -> usize {
        self.upstreams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upstreams.is_empty()
    }
}
