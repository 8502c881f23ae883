// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// Resolve config file: NI_CONFIG > XDG_CONFIG_HOME/ni/config.toml > ~/.config/ni/config.toml
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = non_empty("NI_CONFIG") {
        return Some(PathBuf::from(path));
    }
    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("ni/config.toml"));
    }
    dirs::home_dir().map(|home| home.join(".config/ni/config.toml"))
}

/// Resolve state directory: NI_STATE_DIR > XDG_STATE_HOME/ni > ~/.local/state/ni
pub fn state_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty("NI_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("ni"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/ni"))
}

/// Explicit state dir override, ignoring the XDG/home fallbacks
pub fn state_dir_override() -> Option<PathBuf> {
    non_empty("NI_STATE_DIR").map(PathBuf::from)
}

/// Polling interval override
pub fn check_interval_secs() -> Option<u64> {
    std::env::var("NI_CHECK_INTERVAL_SECS").ok().and_then(|s| s.parse::<u64>().ok())
}

/// RPC timeout override applied to every node
pub fn rpc_timeout() -> Option<Duration> {
    std::env::var("NI_RPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

pub fn slack_webhook_url() -> Option<String> {
    non_empty("NI_SLACK_WEBHOOK_URL")
}

/// Log filter directives (`NI_LOG`, then `RUST_LOG`)
pub fn log_filter() -> Option<String> {
    non_empty("NI_LOG").or_else(|| non_empty("RUST_LOG"))
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
