// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nid nodes` - list configured nodes

use std::path::Path;

use anyhow::Result;
use ni_daemon::{logging, Config};

use crate::output::{node_line, OutputFormat};

pub fn handle(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let _log_guard = logging::init(None)?;
    let config = Config::load(config_path)?;
    let nodes = config.nodes();

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = nodes
                .iter()
                .map(|n| {
                    serde_json::json!({
                        "name": n.name(),
                        "rpc_url": n.rpc_url(),
                        "rpc_timeout_ms": n.rpc_timeout().as_millis() as u64,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for node in &nodes {
                println!("{}", node_line(node));
            }
        }
    }
    Ok(())
}
