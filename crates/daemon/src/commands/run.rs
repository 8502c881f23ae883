// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid run` - poll every node until Ctrl-C

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use ni_adapters::SubstrateConnector;
use ni_daemon::lifecycle::LOGS_DIR;
use ni_daemon::{build_monitor, logging, Config, RunLock};

pub async fn handle(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let state_dir = config.state_dir()?;
    let _log_guard = logging::init(Some(&state_dir.join(LOGS_DIR)))?;
    config.warn_on_overlap();

    let lock = RunLock::acquire(&state_dir)?;
    tracing::info!(lock = %lock.path().display(), "acquired run lock");

    let monitor = Arc::new(build_monitor(&config, Arc::new(SubstrateConnector))?);
    monitor.run(config.nodes(), config.check_interval(), shutdown_signal()).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the loop runs until killed
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
