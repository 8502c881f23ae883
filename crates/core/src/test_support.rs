// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{HealthSnapshot, Node};
use std::time::Duration;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for snapshots.
pub mod strategies {
    use crate::{HealthSnapshot, HealthStatus, UNMEASURED_LATENCY_MS};
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = HealthStatus> {
        prop_oneof![
            Just(HealthStatus::Healthy),
            Just(HealthStatus::Warning),
            Just(HealthStatus::Critical),
        ]
    }

    /// Latency including the unmeasured sentinel.
    pub fn arb_latency_ms() -> impl Strategy<Value = f64> {
        prop_oneof![
            1 => Just(UNMEASURED_LATENCY_MS),
            9 => 0.0f64..10_000.0,
        ]
    }

    pub fn arb_snapshot() -> impl Strategy<Value = HealthSnapshot> {
        (0u32..200, 0u64..200, 0u64..300, arb_latency_ms(), any::<bool>()).prop_map(
            |(peers, lag, age, rpc, finality_measured)| {
                let builder = HealthSnapshot::builder()
                    .peers(peers)
                    .finality_lag(lag)
                    .block_age(age)
                    .rpc_ms(rpc);
                if finality_measured {
                    builder.build()
                } else {
                    builder.finality_unmeasured().build()
                }
            },
        )
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

pub fn test_node(name: &str) -> Node {
    Node::new(name, format!("ws://{}.invalid:9944", name.to_lowercase()))
        .with_rpc_timeout(Duration::from_millis(500))
}

/// Snapshot that lands in every healthy band and trips no default threshold.
pub fn healthy_snapshot(node: &str) -> HealthSnapshot {
    HealthSnapshot::builder().node_name(node).build()
}
