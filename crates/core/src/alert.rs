// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Threshold-breach alerts and the operator-configured thresholds behind them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alert level: {0}")]
pub struct UnknownAlertLevel(pub String);

crate::string_enum! {
    AlertLevel, UnknownAlertLevel {
        Info => "info",
        Warning => "warning",
        Critical => "critical",
    }
}

/// Which signal triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertMetric {
    FinalityLag,
    RpcResponseTime,
    PeersCount,
    BlockAge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alert metric: {0}")]
pub struct UnknownAlertMetric(pub String);

crate::string_enum! {
    AlertMetric, UnknownAlertMetric {
        FinalityLag => "finality_lag",
        RpcResponseTime => "rpc_response_time",
        PeersCount => "peers_count",
        BlockAge => "block_age",
    }
}

/// One threshold breach for one node in one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    /// Embeds the observed value and the threshold
    pub message: String,
    /// Copied from the triggering snapshot
    pub timestamp: DateTime<Utc>,
    pub node_name: String,
    #[serde(rename = "metric_name")]
    pub metric: AlertMetric,
}

/// Operator-configured alert thresholds.
///
/// Independent of the health evaluator's fixed bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Alert when `finality_lag` exceeds this many blocks
    pub finality_lag: u64,
    /// Alert when RPC latency exceeds this many milliseconds
    pub rpc_response_ms: f64,
    /// Alert when the peer count drops below this
    pub min_peers: u32,
    /// Alert when the last block is older than this many seconds
    pub block_age_secs: u64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self { finality_lag: 50, rpc_response_ms: 5000.0, min_peers: 5, block_age_secs: 60 }
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
