// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use ni_core::{HealthSnapshot, Node};
use ni_engine::{format_response_time, HealthReport};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One-line summary of a report, e.g.
/// `Polkadot  healthy  height=1000 peers=50 age=6s rpc=120ms lag=3`
pub fn report_line(report: &HealthReport) -> String {
    let m = &report.metrics;
    format!(
        "{}  {}  height={} peers={} age={}s rpc={} lag={}",
        report.node_name,
        report.status,
        m.block_height,
        m.peers,
        m.time_since_last_block_seconds,
        format_response_time(m.rpc_response_time_ms),
        m.finality_lag,
    )
}

pub fn unavailable_line(node: &str) -> String {
    format!("{node}  unavailable")
}

pub fn node_line(node: &Node) -> String {
    format!("{}  {}", node.name(), node.rpc_url())
}

pub fn snapshot_line(snapshot: &HealthSnapshot) -> String {
    let status = snapshot.status.map(|s| s.as_str()).unwrap_or("-");
    format!(
        "{}  {}  height={} peers={} age={}s rpc={} lag={}",
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S"),
        status,
        snapshot.block_height,
        snapshot.peers_count,
        snapshot.time_since_last_block,
        format_response_time(snapshot.rpc_response_time),
        snapshot.finality_lag,
    )
}
