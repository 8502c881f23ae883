// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid nodes` specs

use crate::prelude::*;

#[test]
fn missing_default_config_lists_builtin_nodes() {
    cli()
        .args(&["nodes"])
        .passes()
        .stdout_has("Polkadot  wss://rpc.polkadot.io")
        .stdout_has("Kusama  wss://kusama-rpc.polkadot.io");
}

#[test]
fn configured_nodes_replace_builtin_ones() {
    let project = Project::with_config(
        r#"
[[nodes]]
name = "Westend"
rpc_url = "wss://westend-rpc.polkadot.io"
"#,
    );

    project
        .nid()
        .args(&["nodes"])
        .passes()
        .stdout_has("Westend  wss://westend-rpc.polkadot.io")
        .stdout_lacks("Polkadot");
}

#[test]
fn json_output_carries_effective_timeout() {
    let project = Project::with_config(
        r#"
rpc_timeout_secs = 7

[[nodes]]
name = "Local"
rpc_url = "ws://127.0.0.1:9944"

[[nodes]]
name = "Slow"
rpc_url = "ws://127.0.0.1:9945"
rpc_timeout_secs = 30
"#,
    );

    let run = project.nid().args(&["nodes", "-o", "json"]).passes();
    let nodes: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(nodes[0]["name"], "Local");
    assert_eq!(nodes[0]["rpc_timeout_ms"], 7000);
    assert_eq!(nodes[1]["rpc_timeout_ms"], 30000);
}

#[test]
fn env_timeout_overrides_every_node() {
    let project = Project::with_config(
        r#"
[[nodes]]
name = "Local"
rpc_url = "ws://127.0.0.1:9944"
rpc_timeout_secs = 30
"#,
    );

    let run = project
        .nid()
        .env("NI_RPC_TIMEOUT_MS", "1500")
        .args(&["nodes", "--output", "json"])
        .passes();
    let nodes: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(nodes[0]["rpc_timeout_ms"], 1500);
}
