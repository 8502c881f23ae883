// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid history` - stored snapshots for one node

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use ni_daemon::lifecycle::METRICS_DIR;
use ni_daemon::{logging, Config};
use ni_storage::MetricsStore;

use crate::output::{snapshot_line, OutputFormat};

#[derive(Args)]
pub struct HistoryArgs {
    /// Node name
    pub node: String,

    /// Window to show, in hours
    #[arg(long, default_value_t = 24)]
    pub hours: u64,
}

pub fn handle(config_path: Option<&Path>, args: HistoryArgs, format: OutputFormat) -> Result<()> {
    let _log_guard = logging::init(None)?;
    let config = Config::load(config_path)?;
    let store = MetricsStore::new(config.state_dir()?.join(METRICS_DIR));
    let window = Duration::from_secs(args.hours.saturating_mul(3600));
    let snapshots = store.for_node(&args.node, window)?;

    match format {
        OutputFormat::Json => {
            for snapshot in &snapshots {
                println!("{}", serde_json::to_string(snapshot)?);
            }
        }
        OutputFormat::Text => {
            if snapshots.is_empty() {
                println!("No history for {} in the last {}h", args.node, args.hours);
            }
            for snapshot in &snapshots {
                println!("{}", snapshot_line(snapshot));
            }
        }
    }
    Ok(())
}
