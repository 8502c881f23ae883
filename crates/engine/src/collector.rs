// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-node probe cycle.
//!
//! Connect and chain head are foundational: if either fails the cycle
//! yields no snapshot. The remaining four queries run concurrently, each
//! under its own timeout, and degrade to a fallback on failure.

use crate::executor::Executor;
use crate::health;
use ni_adapters::{ChainClient, ChainConnector};
use ni_core::{Clock, HealthSnapshot, Measured, Node, UNMEASURED_LATENCY_MS};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Retries for the chain-head query
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Cached connection for one node. Held for the whole cycle, so cycles and
/// disconnects for the same node never interleave.
type Slot = Arc<tokio::sync::Mutex<Option<Arc<dyn ChainClient>>>>;

/// Whole seconds between a block timestamp and now, clamped at zero.
pub fn time_since_block(timestamp_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(timestamp_ms) / 1000
}

pub struct MetricsCollector<C: Clock> {
    connector: Arc<dyn ChainConnector>,
    executor: Executor,
    clock: C,
    max_retries: u32,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<C: Clock> MetricsCollector<C> {
    pub fn new(connector: Arc<dyn ChainConnector>, clock: C) -> Self {
        Self {
            connector,
            executor: Executor::new(),
            clock,
            max_retries: DEFAULT_MAX_RETRIES,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Names of nodes with a live cached connection. A node whose slot is
    /// held by an in-flight collection is left out: its state is unknown
    /// until that collection finishes.
    pub fn connected_nodes(&self) -> Vec<String> {
        let slots: Vec<(String, Slot)> =
            self.slots.lock().iter().map(|(k, v)| (k.clone(), Arc::clone(v))).collect();
        let mut names: Vec<String> = slots
            .into_iter()
            .filter(|(_, slot)| slot.try_lock().map(|g| g.is_some()).unwrap_or(false))
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
    }

    fn slot(&self, name: &str) -> Slot {
        Arc::clone(self.slots.lock().entry(name.to_string()).or_default())
    }

    /// Run one probe cycle. `None` means the node is unavailable.
    pub async fn collect_metrics(&self, node: &Node) -> Option<HealthSnapshot> {
        let timeout = node.rpc_timeout();
        let slot = self.slot(node.name());
        let mut cached = slot.lock().await;

        let client = match cached.as_ref() {
            Some(client) => Arc::clone(client),
            None => {
                let connected = self
                    .executor
                    .run_with_timeout("connect", timeout, None, async {
                        self.connector.connect(node).await.map(Some)
                    })
                    .await;
                let Some(client) = connected else {
                    tracing::error!(node = node.name(), url = node.rpc_url(), "could not connect");
                    return None;
                };
                tracing::info!(node = node.name(), url = node.rpc_url(), "connected");
                *cached = Some(Arc::clone(&client));
                client
            }
        };

        let head = self
            .executor
            .run_with_retry("chain_head", self.max_retries, timeout, None, || {
                let client = Arc::clone(&client);
                async move { client.chain_head().await.map(Some) }
            })
            .await;
        let Some(head) = head else {
            tracing::error!(node = node.name(), "could not get chain head, node unavailable");
            // Drop the handle so the next cycle starts from a fresh connection
            if let Some(stale) = cached.take() {
                stale.disconnect().await;
            }
            return None;
        };
        let block_height = head.block_height;

        let ex = &self.executor;
        let (finalized, peers, block_ts, latency) = tokio::join!(
            ex.run_with_timeout("finalized_block_number", timeout, 0, client.finalized_block_number()),
            ex.run_with_timeout("peers_count", timeout, 0, client.peers_count()),
            ex.run_with_timeout("finalized_block_timestamp", timeout, None, async {
                client.finalized_block_timestamp().await.map(Some)
            }),
            ex.run_with_timeout("rpc_latency", timeout, Measured::Unmeasured, async {
                client.measure_rpc_latency().await.map(Measured::from_latency_ms)
            }),
        );
        drop(cached);

        let finality = if finalized > 0 {
            Measured::Value(block_height.saturating_sub(finalized))
        } else {
            Measured::Unmeasured
        };
        let now_ms = self.clock.epoch_ms();
        let time_since_last_block =
            block_ts.filter(|ts| *ts > 0).map(|ts| time_since_block(ts, now_ms)).unwrap_or(0);

        let snapshot = HealthSnapshot {
            node_name: node.name().to_string(),
            block_height,
            reference_block_height: block_height,
            peers_count: peers,
            finality_lag: finality.into_sentinel(0),
            finality_measured: finality.is_measured(),
            time_since_last_block,
            rpc_response_time: latency.into_sentinel(UNMEASURED_LATENCY_MS),
            status: None,
            timestamp: self.clock.now_utc(),
        };
        let status = health::evaluate(&snapshot);
        let snapshot = snapshot.stamp(status);

        tracing::info!(
            target: "ni::metrics",
            node = %snapshot.node_name,
            block_height = snapshot.block_height,
            peers = snapshot.peers_count,
            finality_lag = snapshot.finality_lag,
            finality_measured = snapshot.finality_measured,
            time_since_last_block = snapshot.time_since_last_block,
            rpc_response_time = %health::format_response_time(snapshot.rpc_response_time),
            %status,
            "metrics_collected"
        );
        Some(snapshot)
    }

    /// Release and forget the cached connection for one node. Waits for an
    /// in-flight cycle on that node to finish.
    pub async fn disconnect(&self, name: &str) {
        let slot = self.slots.lock().remove(name);
        if let Some(slot) = slot {
            release(name, &slot).await;
        }
    }

    pub async fn disconnect_all(&self) {
        let slots: Vec<(String, Slot)> = self.slots.lock().drain().collect();
        for (name, slot) in slots {
            release(&name, &slot).await;
        }
    }
}

async fn release(name: &str, slot: &Slot) {
    let client = slot.lock().await.take();
    if let Some(client) = client {
        client.disconnect().await;
        tracing::info!(node = name, "disconnected");
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
