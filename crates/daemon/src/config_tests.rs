// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

const FULL: &str = r#"
check_interval_secs = 30
rpc_timeout_secs = 5
max_retries = 2
state_dir = "/var/lib/ni"

[thresholds]
finality_lag = 20
min_peers = 3

[notify]
slack_webhook_url = "https://hooks.slack.com/services/T/B/X"
desktop = true

[[nodes]]
name = "Polkadot"
rpc_url = "wss://rpc.polkadot.io"

[[nodes]]
name = "Local"
rpc_url = "ws://127.0.0.1:9944"
rpc_timeout_secs = 2
"#;

fn clear_overrides() {
    for key in ["NI_CHECK_INTERVAL_SECS", "NI_RPC_TIMEOUT_MS", "NI_SLACK_WEBHOOK_URL", "NI_STATE_DIR"] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_watch_polkadot_and_kusama() {
    let config = Config::default();
    let names: Vec<_> = config.nodes().iter().map(|n| n.name().to_string()).collect();
    assert_eq!(names, vec!["Polkadot", "Kusama"]);
    assert_eq!(config.check_interval(), Duration::from_secs(60));
    assert_eq!(config.thresholds, AlertThresholds::default());
    config.validate().unwrap();
}

#[test]
fn parses_full_file() {
    let config = Config::from_toml(FULL).unwrap();

    assert_eq!(config.check_interval_secs, 30);
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.state_dir, Some(PathBuf::from("/var/lib/ni")));
    assert_eq!(config.thresholds.finality_lag, 20);
    assert_eq!(config.thresholds.min_peers, 3);
    // Unset thresholds keep their defaults
    assert_eq!(config.thresholds.block_age_secs, 60);
    assert!(config.notify.desktop);

    let nodes = config.nodes();
    assert_eq!(nodes[0].rpc_timeout(), Duration::from_secs(5));
    assert_eq!(nodes[1].rpc_timeout(), Duration::from_secs(2));
}

#[test]
fn partial_file_keeps_default_nodes() {
    let config = Config::from_toml("check_interval_secs = 15").unwrap();
    assert_eq!(config.nodes.len(), 2);
    assert_eq!(config.rpc_timeout_secs, 10);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(matches!(Config::from_toml("check_intervl_secs = 15"), Err(ConfigError::Parse(_))));
}

#[yare::parameterized(
    no_nodes   = { "nodes = []", "no nodes configured" },
    empty_name = { "[[nodes]]\nname = \" \"\nrpc_url = \"wss://a\"", "node name must not be empty" },
    duplicate  = { "[[nodes]]\nname = \"A\"\nrpc_url = \"wss://a\"\n[[nodes]]\nname = \"A\"\nrpc_url = \"wss://b\"", "duplicate node name: A" },
    http_url   = { "[[nodes]]\nname = \"A\"\nrpc_url = \"https://a\"", "rpc_url must start with ws://" },
    zero_interval = { "check_interval_secs = 0", "check_interval_secs must be greater than zero" },
    zero_timeout  = { "rpc_timeout_secs = 0", "rpc timeout for Polkadot" },
)]
fn validation_errors(toml: &str, message: &str) {
    let err = Config::from_toml(toml).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains(message), "{err}");
}

#[test]
fn find_node_by_name() {
    let config = Config::default();
    assert_eq!(config.find_node("Kusama").map(|n| n.rpc_url().to_string()).as_deref(), Some("wss://kusama-rpc.polkadot.io"));
    assert!(config.find_node("Westend").is_none());
}

#[test]
fn worst_case_cycle_covers_retries() {
    let config = Config::from_toml(FULL).unwrap();
    let node = &config.nodes()[0];
    // connect 5s + 3 chain-head attempts 15s + 2 backoffs 2s + parallel queries 5s
    assert_eq!(config.worst_case_cycle(node), Duration::from_secs(27));
}

#[test]
#[serial]
fn env_overrides_win() {
    clear_overrides();
    std::env::set_var("NI_CHECK_INTERVAL_SECS", "90");
    std::env::set_var("NI_RPC_TIMEOUT_MS", "1500");
    std::env::set_var("NI_SLACK_WEBHOOK_URL", "https://hooks.example/ni");
    std::env::set_var("NI_STATE_DIR", "/tmp/ni-state");

    let mut config = Config::from_toml(FULL).unwrap();
    config.apply_env_overrides();
    clear_overrides();

    assert_eq!(config.check_interval_secs, 90);
    assert!(config.nodes().iter().all(|n| n.rpc_timeout() == Duration::from_millis(1500)));
    assert_eq!(config.notify.slack_webhook_url.as_deref(), Some("https://hooks.example/ni"));
    assert_eq!(config.state_dir().unwrap(), PathBuf::from("/tmp/ni-state"));
}

#[test]
#[serial]
fn load_reads_explicit_path() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, FULL).unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.nodes.len(), 2);
}

#[test]
#[serial]
fn load_fails_for_missing_explicit_path() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
#[serial]
fn load_without_file_uses_defaults() {
    clear_overrides();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("NI_CONFIG", dir.path().join("missing.toml"));
    let config = Config::load(None);
    std::env::remove_var("NI_CONFIG");

    assert_eq!(config.unwrap().nodes.len(), 2);
}
