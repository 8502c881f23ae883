// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitored endpoint identity.

use std::fmt;
use std::time::Duration;

/// Per-operation RPC timeout used when a node does not override it.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// A monitored blockchain RPC endpoint.
///
/// `name` is the unique key for client caching and alert attribution.
/// Nodes are built from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    name: String,
    rpc_url: String,
    rpc_timeout: Duration,
}

impl Node {
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        Self { name: name.into(), rpc_url: rpc_url.into(), rpc_timeout: DEFAULT_RPC_TIMEOUT }
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Timeout applied to every individual chain-client call for this node
    pub fn rpc_timeout(&self) -> Duration {
        self.rpc_timeout
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rpc_url)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
