// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! nid - blockchain node health inspector

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "nid", version, about = "Monitor the health of blockchain RPC nodes")]
struct Cli {
    /// Config file (default: $NI_CONFIG, then ~/.config/ni/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll every configured node until interrupted (default)
    Run,
    /// Run one cycle and print a health report per node
    Check(commands::check::CheckArgs),
    /// List configured nodes
    Nodes,
    /// Print stored snapshots for a node
    History(commands::history::HistoryArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{exit}");
                }
                exit.code
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        },
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command.unwrap_or(Command::Run) {
        Command::Run => commands::run::handle(config).await,
        Command::Check(args) => commands::check::handle(config, args, cli.output).await,
        Command::Nodes => commands::nodes::handle(config, cli.output),
        Command::History(args) => commands::history::handle(config, args, cli.output),
    }
}
