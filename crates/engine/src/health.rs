// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health evaluation.
//!
//! Four signals are banded independently, then reduced to one verdict.
//! The bands are fixed; operator thresholds live in [`crate::alerts`].

use chrono::{DateTime, Utc};
use ni_core::{HealthSnapshot, HealthStatus, Measured};
use serde::{Deserialize, Serialize};

/// Peer counts above this are healthy
const PEERS_HEALTHY_ABOVE: u32 = 20;
const BLOCK_AGE_HEALTHY_SECS: u64 = 12;
const BLOCK_AGE_WARNING_SECS: u64 = 30;
const LATENCY_HEALTHY_MS: f64 = 500.0;
const LATENCY_WARNING_MS: f64 = 2000.0;
/// Lags below this are healthy
const FINALITY_WARNING_FROM: u64 = 10;
const FINALITY_WARNING_TO: u64 = 30;

/// Zero peers is what public endpoints with peer introspection disabled
/// report, so it is not a degradation.
pub fn peers_status(peers: u32) -> HealthStatus {
    match peers {
        0 => HealthStatus::Healthy,
        n if n > PEERS_HEALTHY_ABOVE => HealthStatus::Healthy,
        _ => HealthStatus::Warning,
    }
}

pub fn block_age_status(secs: u64) -> HealthStatus {
    if secs <= BLOCK_AGE_HEALTHY_SECS {
        HealthStatus::Healthy
    } else if secs <= BLOCK_AGE_WARNING_SECS {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}

/// An unmeasured latency means the probe timed out, which is past every band.
pub fn latency_status(latency: Measured<f64>) -> HealthStatus {
    match latency {
        Measured::Unmeasured => HealthStatus::Critical,
        Measured::Value(ms) if ms <= LATENCY_HEALTHY_MS => HealthStatus::Healthy,
        Measured::Value(ms) if ms <= LATENCY_WARNING_MS => HealthStatus::Warning,
        Measured::Value(_) => HealthStatus::Critical,
    }
}

/// Zero lag is critical: the collector degrades a failed finalized-number
/// query to zero, and the two cannot be told apart from the lag alone.
pub fn finality_status(lag: u64) -> HealthStatus {
    match lag {
        0 => HealthStatus::Critical,
        n if n < FINALITY_WARNING_FROM => HealthStatus::Healthy,
        n if n <= FINALITY_WARNING_TO => HealthStatus::Warning,
        _ => HealthStatus::Critical,
    }
}

/// Per-signal verdicts in the order peers, block age, latency, finality.
pub fn signal_statuses(snapshot: &HealthSnapshot) -> [HealthStatus; 4] {
    [
        peers_status(snapshot.peers_count),
        block_age_status(snapshot.time_since_last_block),
        latency_status(snapshot.rpc_latency()),
        finality_status(snapshot.finality_lag),
    ]
}

/// Worst-of reduction where two or more warnings escalate to critical.
pub fn reduce(signals: &[HealthStatus]) -> HealthStatus {
    let warnings = signals.iter().filter(|s| **s == HealthStatus::Warning).count();
    if signals.contains(&HealthStatus::Critical) || warnings >= 2 {
        HealthStatus::Critical
    } else if warnings == 1 {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

pub fn evaluate(snapshot: &HealthSnapshot) -> HealthStatus {
    reduce(&signal_statuses(snapshot))
}

/// Raw metric values of a [`HealthReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub block_height: u64,
    pub peers: u32,
    pub time_since_last_block_seconds: u64,
    pub rpc_response_time_ms: f64,
    pub finality_lag: u64,
}

/// Summary of one snapshot for logs and `nid check`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub node_name: String,
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub metrics: ReportMetrics,
}

/// Uses the stamped status, evaluating when the snapshot has none yet.
pub fn generate_report(snapshot: &HealthSnapshot) -> HealthReport {
    HealthReport {
        node_name: snapshot.node_name.clone(),
        status: snapshot.status.unwrap_or_else(|| evaluate(snapshot)),
        timestamp: snapshot.timestamp,
        metrics: ReportMetrics {
            block_height: snapshot.block_height,
            peers: snapshot.peers_count,
            time_since_last_block_seconds: snapshot.time_since_last_block,
            rpc_response_time_ms: snapshot.rpc_response_time,
            finality_lag: snapshot.finality_lag,
        },
    }
}

/// `"<n>ms"` under a second, `"<s.ss>s"` above, `"n/a"` when unmeasured.
pub fn format_response_time(ms: f64) -> String {
    match Measured::from_latency_ms(ms) {
        Measured::Unmeasured => "n/a".to_string(),
        Measured::Value(ms) if ms < 1000.0 => format!("{ms:.0}ms"),
        Measured::Value(ms) => format!("{:.2}s", ms / 1000.0),
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
