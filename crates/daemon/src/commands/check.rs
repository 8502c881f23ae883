// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid check` - one collection per node, printed as a health report

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;
use ni_adapters::SubstrateConnector;
use ni_core::Node;
use ni_daemon::{build_monitor, logging, Config};
use ni_engine::generate_report;
use tokio::task::JoinSet;

use crate::exit_error::ExitError;
use crate::output::{report_line, unavailable_line, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    /// Only check this node
    #[arg(long)]
    pub node: Option<String>,
}

pub async fn handle(config_path: Option<&Path>, args: CheckArgs, format: OutputFormat) -> Result<()> {
    let _log_guard = logging::init(None)?;
    let config = Config::load(config_path)?;
    let nodes: Vec<Node> = match &args.node {
        Some(name) => {
            vec![config.find_node(name).ok_or_else(|| anyhow!("node not found in config: {name}"))?]
        }
        None => config.nodes(),
    };

    let monitor = Arc::new(build_monitor(&config, Arc::new(SubstrateConnector))?);
    let mut tasks = JoinSet::new();
    for (index, node) in nodes.iter().cloned().enumerate() {
        let monitor = Arc::clone(&monitor);
        tasks.spawn(async move { (index, monitor.probe(&node).await) });
    }
    let mut results = vec![None; nodes.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, snapshot) = joined?;
        results[index] = snapshot;
    }
    monitor.collector().disconnect_all().await;

    let mut unavailable = 0;
    for (node, snapshot) in nodes.iter().zip(&results) {
        match (snapshot, format) {
            (Some(snapshot), OutputFormat::Json) => {
                println!("{}", serde_json::to_string(&generate_report(snapshot))?);
            }
            (Some(snapshot), OutputFormat::Text) => {
                println!("{}", report_line(&generate_report(snapshot)));
            }
            (None, OutputFormat::Json) => {
                unavailable += 1;
                let value = serde_json::json!({ "node_name": node.name(), "status": "unavailable" });
                println!("{value}");
            }
            (None, OutputFormat::Text) => {
                unavailable += 1;
                println!("{}", unavailable_line(node.name()));
            }
        }
    }

    if unavailable > 0 {
        return Err(ExitError::new(1, format!("{unavailable} node(s) unavailable")).into());
    }
    Ok(())
}
