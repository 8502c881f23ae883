// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid check` against endpoints that refuse connections

use crate::prelude::*;

const UNREACHABLE: &str = r#"
rpc_timeout_secs = 2

[[nodes]]
name = "Dead"
rpc_url = "ws://127.0.0.1:1"

[[nodes]]
name = "AlsoDead"
rpc_url = "ws://127.0.0.1:2"
"#;

#[test]
fn unreachable_nodes_are_reported_unavailable_with_exit_1() {
    let project = Project::with_config(UNREACHABLE);

    let run = project.nid().args(&["check", "-o", "json"]).fails();

    assert_eq!(run.code(), Some(1));
    let reports = run.stdout_json_lines();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["node_name"], "Dead");
    assert_eq!(reports[0]["status"], "unavailable");
    assert_eq!(reports[1]["node_name"], "AlsoDead");
    run.stderr_has("2 node(s) unavailable");
}

#[test]
fn check_one_node_by_name() {
    let project = Project::with_config(UNREACHABLE);

    let run = project.nid().args(&["check", "--node", "AlsoDead"]).fails();

    assert_eq!(run.stdout().lines().collect::<Vec<_>>(), vec!["AlsoDead  unavailable"]);
    run.stderr_has("1 node(s) unavailable");
}

#[test]
fn check_unknown_node_fails() {
    let project = Project::with_config(UNREACHABLE);

    project
        .nid()
        .args(&["check", "--node", "Westend"])
        .fails()
        .stderr_has("node not found in config: Westend");
}

#[test]
fn check_does_not_write_history() {
    let project = Project::with_config(UNREACHABLE);
    project.nid().args(&["check"]).fails();

    assert!(!project.state_dir().join("metrics/history.jsonl").exists());
}
