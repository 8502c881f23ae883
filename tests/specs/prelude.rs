// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by the specs.

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Env vars a developer's shell could leak into a spec run
const ISOLATED_VARS: &[&str] = &[
    "NI_CHECK_INTERVAL_SECS",
    "NI_RPC_TIMEOUT_MS",
    "NI_SLACK_WEBHOOK_URL",
    "NI_LOG",
    "RUST_LOG",
];

/// `nid` with no project: config resolves to a path that does not exist.
pub fn cli() -> Cli {
    let project = Project::empty();
    let mut cli = project.nid();
    cli._scratch = Some(project.dir);
    cli
}

/// Scratch config and state directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    /// Project whose config holds `toml`
    pub fn with_config(toml: &str) -> Self {
        let project = Self::empty();
        project.file("config.toml", toml);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn nid(&self) -> Cli {
        let mut cmd = Command::cargo_bin("nid").unwrap();
        cmd.env("NI_CONFIG", self.config_path()).env("NI_STATE_DIR", self.state_dir());
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        Cli { cmd, _scratch: None }
    }
}

pub struct Cli {
    cmd: Command,
    /// Keeps the scratch dir of [`cli()`] alive until the run
    _scratch: Option<TempDir>,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn output(mut self) -> Output {
        self.cmd.output().unwrap()
    }

    /// Run and require exit code 0
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(output.status.success(), "expected success, got {}", describe(&output));
        RunAssert { output }
    }

    /// Run and require a non-zero exit
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(!output.status.success(), "expected failure, got {}", describe(&output));
        RunAssert { output }
    }
}

fn describe(output: &Output) -> String {
    format!(
        "{}\n--- stdout ---\n{}\n--- stderr ---\n{}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(self.stdout().contains(expected), "stdout missing {expected:?}\n{}", describe(&self.output));
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        assert!(!self.stdout().contains(unexpected), "stdout has {unexpected:?}\n{}", describe(&self.output));
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(self.stderr().contains(expected), "stderr missing {expected:?}\n{}", describe(&self.output));
        self
    }

    /// Each non-empty stdout line parsed as JSON
    pub fn stdout_json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout()
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}
