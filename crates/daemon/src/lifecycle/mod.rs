// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup wiring: run lock, notification channels, monitor assembly.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use ni_adapters::{
    ChainConnector, DesktopNotifyAdapter, LogNotifyAdapter, NotifyAdapter, NotifyError,
    SlackNotifyAdapter,
};
use ni_core::SystemClock;
use ni_engine::{AlertDispatcher, AlertGenerator, MetricsCollector};
use ni_storage::MetricsStore;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::monitor::Monitor;

pub const LOCK_FILE: &str = "nid.pid";
pub const METRICS_DIR: &str = "metrics";
pub const LOGS_DIR: &str = "logs";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("another nid run holds {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("notification setup failed: {0}")]
    Notify(#[from] NotifyError),
}

/// Exclusive lock on `<state_dir>/nid.pid`, held while polling so two
/// loops never append to the same history. Released on drop.
#[derive(Debug)]
pub struct RunLock {
    _file: File,
    path: PathBuf,
}

impl RunLock {
    pub fn acquire(state_dir: &Path) -> Result<Self, StartupError> {
        std::fs::create_dir_all(state_dir)?;
        let path = state_dir.join(LOCK_FILE);
        // Don't truncate before holding the lock: that would wipe the
        // running loop's PID.
        let mut file =
            std::fs::OpenOptions::new().write(true).create(true).truncate(false).open(&path)?;
        file.try_lock_exclusive()
            .map_err(|source| StartupError::LockFailed { path: path.clone(), source })?;
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Configured delivery channels; the log channel when none is configured.
pub fn notify_channels(config: &Config) -> Result<Vec<Arc<dyn NotifyAdapter>>, NotifyError> {
    let mut channels: Vec<Arc<dyn NotifyAdapter>> = Vec::new();
    if let Some(url) = &config.notify.slack_webhook_url {
        channels.push(Arc::new(SlackNotifyAdapter::new(url.clone())?));
    }
    if config.notify.desktop {
        channels.push(Arc::new(DesktopNotifyAdapter::new()));
    }
    if channels.is_empty() {
        channels.push(Arc::new(LogNotifyAdapter));
    }
    Ok(channels)
}

pub fn build_monitor(
    config: &Config,
    connector: Arc<dyn ChainConnector>,
) -> Result<Monitor<SystemClock>, StartupError> {
    let state_dir = config.state_dir()?;
    let collector =
        MetricsCollector::new(connector, SystemClock).with_max_retries(config.max_retries);
    let dispatcher = AlertDispatcher::new(notify_channels(config)?);
    tracing::debug!(channels = ?dispatcher.channel_names(), "alert channels");

    Ok(Monitor::new(
        collector,
        AlertGenerator::new(config.thresholds),
        dispatcher,
        MetricsStore::new(state_dir.join(METRICS_DIR)),
    ))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
