// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ni-engine: metrics collection and health evaluation pipeline.
//!
//! One probe cycle per node: [`MetricsCollector`] gathers a snapshot through
//! the [`Executor`], [`health::evaluate`] stamps it, [`AlertGenerator`] checks
//! it against operator thresholds and [`AlertDispatcher`] delivers the alerts.

pub mod alerts;
mod collector;
mod dispatch;
mod executor;
pub mod health;

pub use alerts::AlertGenerator;
pub use collector::{time_since_block, MetricsCollector, DEFAULT_MAX_RETRIES};
pub use dispatch::AlertDispatcher;
pub use executor::{Executor, DEFAULT_BACKOFF};
pub use health::{evaluate, format_response_time, generate_report, HealthReport, ReportMetrics};
