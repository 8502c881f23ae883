// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config loading failures surface as non-zero exits

use crate::prelude::*;

#[test]
fn explicit_missing_config_fails() {
    let project = Project::empty();
    let missing = project.path().join("absent.toml");

    project
        .nid()
        .args(&["nodes", "--config", missing.to_str().unwrap()])
        .fails()
        .stderr_has("failed to read");
}

#[test]
fn non_websocket_url_is_rejected() {
    let project = Project::with_config(
        r#"
[[nodes]]
name = "Polkadot"
rpc_url = "https://rpc.polkadot.io"
"#,
    );

    project.nid().args(&["nodes"]).fails().stderr_has("ws:// or wss://");
}

#[test]
fn duplicate_node_names_are_rejected() {
    let project = Project::with_config(
        r#"
[[nodes]]
name = "Polkadot"
rpc_url = "wss://rpc.polkadot.io"

[[nodes]]
name = "Polkadot"
rpc_url = "wss://polkadot-rpc.dwellir.com"
"#,
    );

    project.nid().args(&["nodes"]).fails().stderr_has("duplicate node name: Polkadot");
}

#[test]
fn unknown_keys_are_rejected() {
    let project = Project::with_config("check_intervall_secs = 30\n");
    project.nid().args(&["nodes"]).fails().stderr_has("invalid config");
}

#[test]
fn empty_node_list_is_rejected() {
    let project = Project::with_config("nodes = []\n");
    project.nid().args(&["nodes"]).fails().stderr_has("no nodes configured");
}
