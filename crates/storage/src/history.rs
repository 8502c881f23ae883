// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot and alert history.
//!
//! Evaluated snapshots are appended to `<dir>/history.jsonl` and alerts to
//! `<dir>/alerts.jsonl`, one JSON object per line, synced after every
//! append so history survives a crash. Files past [`MAX_HISTORY_SIZE`] are
//! rotated to `.1`, `.2`, `.3`; queries only read the live file.

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use ni_core::{Alert, Clock, HealthSnapshot, SystemClock};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const HISTORY_FILE: &str = "history.jsonl";
pub const ALERTS_FILE: &str = "alerts.jsonl";

/// Maximum history file size before rotation (10 MB).
pub const MAX_HISTORY_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rotated files to keep (history.jsonl.1, .2, .3).
const MAX_ROTATED_FILES: u32 = 3;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot for {node} has no health status")]
    Unevaluated { node: String },
}

pub struct MetricsStore<C: Clock = SystemClock> {
    dir: PathBuf,
    clock: C,
    max_size: u64,
    /// Serializes appends from concurrent node tasks
    write_lock: Mutex<()>,
}

impl MetricsStore<SystemClock> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, SystemClock)
    }
}

impl<C: Clock> MetricsStore<C> {
    pub fn with_clock(dir: impl Into<PathBuf>, clock: C) -> Self {
        Self { dir: dir.into(), clock, max_size: MAX_HISTORY_SIZE, write_lock: Mutex::new(()) }
    }

    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    pub fn alerts_path(&self) -> PathBuf {
        self.dir.join(ALERTS_FILE)
    }

    /// Append one evaluated snapshot.
    pub fn append(&self, snapshot: &HealthSnapshot) -> Result<(), StorageError> {
        self.append_batch(std::slice::from_ref(snapshot))
    }

    /// Append snapshots in order. Nothing is written unless every snapshot
    /// has been evaluated.
    pub fn append_batch(&self, snapshots: &[HealthSnapshot]) -> Result<(), StorageError> {
        if let Some(s) = snapshots.iter().find(|s| !s.is_evaluated()) {
            return Err(StorageError::Unevaluated { node: s.node_name.clone() });
        }
        self.append_lines(&self.history_path(), snapshots)
    }

    pub fn append_alerts(&self, alerts: &[Alert]) -> Result<(), StorageError> {
        self.append_lines(&self.alerts_path(), alerts)
    }

    /// Snapshots for `node` no older than `window`, newest first.
    pub fn for_node(
        &self,
        node: &str,
        window: Duration,
    ) -> Result<Vec<HealthSnapshot>, StorageError> {
        let cutoff = TimeDelta::from_std(window)
            .ok()
            .and_then(|w| self.clock.now_utc().checked_sub_signed(w))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut snapshots: Vec<HealthSnapshot> = self
            .read_snapshots()?
            .into_iter()
            .filter(|s| s.node_name == node && s.timestamp >= cutoff)
            .collect();
        // Stable sort keeps later lines first among equal timestamps
        snapshots.reverse();
        snapshots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(snapshots)
    }

    pub fn latest(&self, node: &str) -> Result<Option<HealthSnapshot>, StorageError> {
        Ok(self
            .read_snapshots()?
            .into_iter()
            .filter(|s| s.node_name == node)
            .reduce(|best, s| if s.timestamp >= best.timestamp { s } else { best }))
    }

    /// Every node name in the live history, sorted
    pub fn node_names(&self) -> Result<Vec<String>, StorageError> {
        let names: BTreeSet<String> =
            self.read_snapshots()?.into_iter().map(|s| s.node_name).collect();
        Ok(names.into_iter().collect())
    }

    pub fn count(&self, node: Option<&str>) -> Result<usize, StorageError> {
        let snapshots = self.read_snapshots()?;
        Ok(match node {
            Some(name) => snapshots.iter().filter(|s| s.node_name == name).count(),
            None => snapshots.len(),
        })
    }

    pub fn alerts(&self) -> Result<Vec<Alert>, StorageError> {
        read_lines(&self.alerts_path())
    }

    fn read_snapshots(&self) -> Result<Vec<HealthSnapshot>, StorageError> {
        read_lines(&self.history_path())
    }

    fn append_lines<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut buf = String::new();
        for record in records {
            buf.push_str(&serde_json::to_string(record)?);
            buf.push('\n');
        }

        let _guard = self.write_lock.lock();
        fs::create_dir_all(&self.dir)?;
        self.rotate_if_needed(path);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(buf.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Shift `path` to `path.1` once it reaches the size limit.
    fn rotate_if_needed(&self, path: &Path) {
        let size = match fs::metadata(path) {
            Ok(m) => m.len(),
            Err(_) => return,
        };
        if size < self.max_size {
            return;
        }

        let path_str = path.display().to_string();

        // Shift older rotations: .3 is overwritten, .2→.3, .1→.2
        for i in (1..MAX_ROTATED_FILES).rev() {
            let _ = fs::rename(format!("{path_str}.{i}"), format!("{path_str}.{}", i + 1));
        }
        if let Err(e) = fs::rename(path, format!("{path_str}.1")) {
            tracing::warn!(path = %path_str, error = %e, "history rotation failed");
        } else {
            tracing::info!(path = %path_str, size, "rotated history file");
        }
    }
}

/// Parse every line of a JSONL file; a missing file is empty.
fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(
                path = %path.display(),
                line = index + 1,
                error = %e,
                "skipping unparseable history line"
            ),
        }
    }
    Ok(records)
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
