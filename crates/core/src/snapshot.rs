// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time health observation of one node.

use crate::measured::Measured;
use crate::status::HealthStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored in `rpc_response_time` when the latency probe failed or timed out.
pub const UNMEASURED_LATENCY_MS: f64 = -1.0;

/// One fully-formed observation of one node.
///
/// Raw fields are filled by the collector; `status` stays `None` until the
/// health evaluator stamps it. Storage and export only accept stamped
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub node_name: String,
    pub block_height: u64,
    /// Secondary height reading, kept apart from `block_height` for
    /// divergence checks. Currently always equal.
    pub reference_block_height: u64,
    pub peers_count: u32,
    /// `block_height - finalized`, clamped at zero. Zero is also what a
    /// failed finalized-number query degrades to.
    pub finality_lag: u64,
    /// False when `finality_lag` is the degraded zero rather than a reading
    #[serde(default = "finality_measured_default")]
    pub finality_measured: bool,
    /// Whole seconds since the finalized block's timestamp
    pub time_since_last_block: u64,
    /// Milliseconds; [`UNMEASURED_LATENCY_MS`] when the probe failed
    pub rpc_response_time: f64,
    #[serde(default)]
    pub status: Option<HealthStatus>,
    pub timestamp: DateTime<Utc>,
}

fn finality_measured_default() -> bool {
    true
}

impl HealthSnapshot {
    /// Latency as a tagged reading, decoding the sentinel
    pub fn rpc_latency(&self) -> Measured<f64> {
        Measured::from_latency_ms(self.rpc_response_time)
    }

    pub fn is_evaluated(&self) -> bool {
        self.status.is_some()
    }

    /// Record the evaluator's verdict.
    pub fn stamp(mut self, status: HealthStatus) -> Self {
        debug_assert!(self.status.is_none(), "snapshot status stamped twice");
        self.status = Some(status);
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use builder::HealthSnapshotBuilder;

#[cfg(any(test, feature = "test-support"))]
mod builder {
    use super::*;
    use crate::clock::FakeClock;

    /// Test builder with values that land in every healthy band.
    pub struct HealthSnapshotBuilder {
        snapshot: HealthSnapshot,
    }

    impl Default for HealthSnapshotBuilder {
        fn default() -> Self {
            Self {
                snapshot: HealthSnapshot {
                    node_name: "test-node".to_string(),
                    block_height: 2_150_000,
                    reference_block_height: 2_150_000,
                    peers_count: 50,
                    finality_lag: 3,
                    finality_measured: true,
                    time_since_last_block: 5,
                    rpc_response_time: 50.0,
                    status: None,
                    timestamp: DateTime::from_timestamp_millis(FakeClock::DEFAULT_EPOCH_MS as i64)
                        .unwrap_or_default(),
                },
            }
        }
    }

    impl HealthSnapshotBuilder {
        pub fn node_name(mut self, v: impl Into<String>) -> Self {
            self.snapshot.node_name = v.into();
            self
        }

        pub fn block_height(mut self, v: u64) -> Self {
            self.snapshot.block_height = v;
            self.snapshot.reference_block_height = v;
            self
        }

        pub fn peers(mut self, v: u32) -> Self {
            self.snapshot.peers_count = v;
            self
        }

        pub fn finality_lag(mut self, v: u64) -> Self {
            self.snapshot.finality_lag = v;
            self
        }

        pub fn finality_unmeasured(mut self) -> Self {
            self.snapshot.finality_lag = 0;
            self.snapshot.finality_measured = false;
            self
        }

        pub fn block_age(mut self, secs: u64) -> Self {
            self.snapshot.time_since_last_block = secs;
            self
        }

        pub fn rpc_ms(mut self, v: f64) -> Self {
            self.snapshot.rpc_response_time = v;
            self
        }

        pub fn status(mut self, v: HealthStatus) -> Self {
            self.snapshot.status = Some(v);
            self
        }

        pub fn timestamp(mut self, v: DateTime<Utc>) -> Self {
            self.snapshot.timestamp = v;
            self
        }

        pub fn build(self) -> HealthSnapshot {
            self.snapshot
        }
    }

    impl HealthSnapshot {
        /// Create a builder with test defaults.
        pub fn builder() -> HealthSnapshotBuilder {
            HealthSnapshotBuilder::default()
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
