// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid history` reads the stored JSONL history

use crate::prelude::*;

fn snapshot_line(node: &str, height: u64, timestamp: &str) -> String {
    serde_json::json!({
        "node_name": node,
        "block_height": height,
        "reference_block_height": height,
        "peers_count": 42,
        "finality_lag": 2,
        "finality_measured": true,
        "time_since_last_block": 6,
        "rpc_response_time": 180.0,
        "status": "healthy",
        "timestamp": timestamp,
    })
    .to_string()
}

fn project_with_history() -> Project {
    let project = Project::empty();
    let lines = [
        snapshot_line("Polkadot", 100, "2024-03-01T10:00:00Z"),
        snapshot_line("Kusama", 500, "2024-03-01T10:00:30Z"),
        snapshot_line("Polkadot", 101, "2024-03-01T10:01:00Z"),
        "{not json".to_string(),
    ];
    project.file("state/metrics/history.jsonl", &format!("{}\n", lines.join("\n")));
    project
}

#[test]
fn history_is_newest_first_for_one_node() {
    let project = project_with_history();

    // Wide window so the fixed fixture timestamps stay inside it
    let run = project
        .nid()
        .args(&["history", "Polkadot", "--hours", "1000000", "-o", "json"])
        .passes();

    let heights: Vec<_> =
        run.stdout_json_lines().iter().map(|s| s["block_height"].as_u64().unwrap()).collect();
    assert_eq!(heights, vec![101, 100]);
}

#[test]
fn history_text_uses_formatted_latency() {
    project_with_history()
        .nid()
        .args(&["history", "Kusama", "--hours", "1000000"])
        .passes()
        .stdout_has("2024-03-01 10:00:30  healthy  height=500 peers=42 age=6s rpc=180ms lag=2");
}

#[test]
fn old_snapshots_fall_outside_window() {
    project_with_history()
        .nid()
        .args(&["history", "Polkadot", "--hours", "1"])
        .passes()
        .stdout_has("No history for Polkadot in the last 1h");
}

#[test]
fn missing_history_is_empty_not_an_error() {
    cli().args(&["history", "Polkadot"]).passes().stdout_has("No history for Polkadot");
}
