// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Threshold alerts.

use ni_core::{Alert, AlertLevel, AlertMetric, AlertThresholds, HealthSnapshot, Measured};

/// Checks snapshots against operator-configured thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertGenerator {
    thresholds: AlertThresholds,
}

impl AlertGenerator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Alerts in the fixed order finality lag, RPC latency, peers, block age.
    ///
    /// An unmeasured latency has no observed value and never alerts.
    pub fn check_alerts(&self, snapshot: &HealthSnapshot) -> Vec<Alert> {
        let t = &self.thresholds;
        let alert = |level, metric, message| Alert {
            level,
            message,
            timestamp: snapshot.timestamp,
            node_name: snapshot.node_name.clone(),
            metric,
        };

        let mut alerts = Vec::new();
        if snapshot.finality_lag > t.finality_lag {
            alerts.push(alert(
                AlertLevel::Critical,
                AlertMetric::FinalityLag,
                format!(
                    "Finality lag is {} blocks (threshold: {})",
                    snapshot.finality_lag, t.finality_lag
                ),
            ));
        }
        if let Measured::Value(ms) = snapshot.rpc_latency() {
            if ms > t.rpc_response_ms {
                alerts.push(alert(
                    AlertLevel::Critical,
                    AlertMetric::RpcResponseTime,
                    format!("RPC response time is {ms:.0}ms (threshold: {}ms)", t.rpc_response_ms),
                ));
            }
        }
        if snapshot.peers_count < t.min_peers {
            alerts.push(alert(
                AlertLevel::Warning,
                AlertMetric::PeersCount,
                format!("Peer count is {} (minimum: {})", snapshot.peers_count, t.min_peers),
            ));
        }
        if snapshot.time_since_last_block > t.block_age_secs {
            alerts.push(alert(
                AlertLevel::Warning,
                AlertMetric::BlockAge,
                format!(
                    "Time since last block: {}s (threshold: {}s)",
                    snapshot.time_since_last_block, t.block_age_secs
                ),
            ));
        }

        for alert in &alerts {
            tracing::warn!(
                node = %alert.node_name,
                metric = %alert.metric,
                level = %alert.level,
                "{}",
                alert.message
            );
        }
        alerts
    }
}

#[cfg(test)]
#[path = "alerts_tests.rs"]
mod tests;
