// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn nid_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("check")
        .stdout_has("nodes")
        .stdout_has("history");
}

#[test]
fn nid_check_help_shows_node_flag() {
    cli().args(&["check", "--help"]).passes().stdout_has("--node");
}

#[test]
fn nid_history_help_shows_hours_flag() {
    cli().args(&["history", "--help"]).passes().stdout_has("--hours");
}

#[test]
fn nid_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("frobnicate");
}
