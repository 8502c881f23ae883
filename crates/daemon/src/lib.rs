// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node inspector daemon library
//!
//! Configuration, logging setup and the polling loop behind the `nid` binary.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod env;
pub mod lifecycle;
pub mod logging;
pub mod monitor;

pub use config::{Config, ConfigError, NodeConfig, NotifyConfig};
pub use lifecycle::{build_monitor, RunLock, StartupError};
pub use monitor::{CycleOutcome, Monitor};
