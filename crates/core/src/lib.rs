// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ni-core: value types shared by the node inspector crates

pub mod macros;

pub mod alert;
pub mod clock;
pub mod measured;
pub mod node;
pub mod snapshot;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alert::{Alert, AlertLevel, AlertMetric, AlertThresholds, UnknownAlertLevel, UnknownAlertMetric};
pub use clock::{Clock, FakeClock, SystemClock};
pub use measured::Measured;
pub use node::{Node, DEFAULT_RPC_TIMEOUT};
#[cfg(any(test, feature = "test-support"))]
pub use snapshot::HealthSnapshotBuilder;
pub use snapshot::{HealthSnapshot, UNMEASURED_LATENCY_MS};
pub use status::{HealthStatus, UnknownStatus};
