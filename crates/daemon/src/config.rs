// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inspector configuration.
//!
//! Loaded from TOML, then overridden from the environment (see [`crate::env`]).
//! A missing default config file yields the built-in defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ni_core::{AlertThresholds, Node};
use ni_engine::DEFAULT_BACKOFF;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no nodes configured")]
    NoNodes,
    #[error("node name must not be empty")]
    EmptyNodeName,
    #[error("duplicate node name: {0}")]
    DuplicateNode(String),
    #[error("node {node}: rpc_url must start with ws:// or wss:// (got {url})")]
    InvalidUrl { node: String, url: String },
    #[error("check_interval_secs must be greater than zero")]
    ZeroInterval,
    #[error("rpc timeout for {0} must be greater than zero")]
    ZeroTimeout(String),
    #[error("could not determine state directory")]
    NoStateDir,
}

/// One `[[nodes]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    pub name: String,
    pub rpc_url: String,
    /// Overrides the global `rpc_timeout_secs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_timeout_secs: Option<u64>,
}

impl NodeConfig {
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        Self { name: name.into(), rpc_url: rpc_url.into(), rpc_timeout_secs: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    pub slack_webhook_url: Option<String>,
    pub desktop: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub check_interval_secs: u64,
    pub rpc_timeout_secs: u64,
    /// Retries for the chain-head query
    pub max_retries: u32,
    pub state_dir: Option<PathBuf>,
    pub thresholds: AlertThresholds,
    pub notify: NotifyConfig,
    pub nodes: Vec<NodeConfig>,
    /// `NI_RPC_TIMEOUT_MS`; wins over every file setting
    #[serde(skip)]
    pub(crate) rpc_timeout_override: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            rpc_timeout_secs: 10,
            max_retries: ni_engine::DEFAULT_MAX_RETRIES,
            state_dir: None,
            thresholds: AlertThresholds::default(),
            notify: NotifyConfig::default(),
            nodes: vec![
                NodeConfig::new("Polkadot", "wss://rpc.polkadot.io"),
                NodeConfig::new("Kusama", "wss://kusama-rpc.polkadot.io"),
            ],
            rpc_timeout_override: None,
        }
    }
}

impl Config {
    /// Load, apply environment overrides and validate.
    ///
    /// An explicit `path` must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match env::config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(secs) = env::check_interval_secs() {
            self.check_interval_secs = secs;
        }
        if let Some(timeout) = env::rpc_timeout() {
            self.rpc_timeout_override = Some(timeout);
        }
        if let Some(url) = env::slack_webhook_url() {
            self.notify.slack_webhook_url = Some(url);
        }
        if let Some(dir) = env::state_dir_override() {
            self.state_dir = Some(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes.is_empty() {
            return Err(ConfigError::NoNodes);
        }
        if self.check_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if node.name.trim().is_empty() {
                return Err(ConfigError::EmptyNodeName);
            }
            if !seen.insert(node.name.as_str()) {
                return Err(ConfigError::DuplicateNode(node.name.clone()));
            }
            if !(node.rpc_url.starts_with("ws://") || node.rpc_url.starts_with("wss://")) {
                return Err(ConfigError::InvalidUrl {
                    node: node.name.clone(),
                    url: node.rpc_url.clone(),
                });
            }
            if self.node_timeout(node).is_zero() {
                return Err(ConfigError::ZeroTimeout(node.name.clone()));
            }
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    fn node_timeout(&self, node: &NodeConfig) -> Duration {
        self.rpc_timeout_override.unwrap_or_else(|| {
            Duration::from_secs(node.rpc_timeout_secs.unwrap_or(self.rpc_timeout_secs))
        })
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.nodes
            .iter()
            .map(|n| Node::new(&n.name, &n.rpc_url).with_rpc_timeout(self.node_timeout(n)))
            .collect()
    }

    pub fn find_node(&self, name: &str) -> Option<Node> {
        let found = self.nodes().into_iter().find(|n| n.name() == name);
        if found.is_none() {
            tracing::warn!(node = name, "node not found in config");
        }
        found
    }

    pub fn state_dir(&self) -> Result<PathBuf, ConfigError> {
        self.state_dir.clone().or_else(env::state_dir).ok_or(ConfigError::NoStateDir)
    }

    /// Longest a cycle can take for `node`: connect, every chain-head
    /// attempt with backoff, then the concurrent degradable queries.
    pub fn worst_case_cycle(&self, node: &Node) -> Duration {
        let timeout = node.rpc_timeout();
        let attempts = self.max_retries.saturating_add(1);
        timeout * 2 + timeout * attempts + DEFAULT_BACKOFF * self.max_retries
    }

    /// Cycles for one node can overlap when the interval is shorter than
    /// the worst case; they are serialized, not skipped.
    pub fn warn_on_overlap(&self) {
        let interval = self.check_interval();
        for node in self.nodes() {
            let worst = self.worst_case_cycle(&node);
            if interval < worst {
                tracing::warn!(
                    node = node.name(),
                    interval_secs = interval.as_secs(),
                    worst_case_secs = worst.as_secs(),
                    "check interval is shorter than the worst-case cycle"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
