// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic polling loop.
//!
//! Each node is polled on its own task. A cycle collects a snapshot,
//! persists it, checks thresholds, persists and dispatches the alerts.
//! Storage and delivery failures are logged and never stop the loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ni_core::{Clock, HealthSnapshot, HealthStatus, Node};
use ni_engine::{AlertDispatcher, AlertGenerator, MetricsCollector};
use ni_storage::MetricsStore;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

/// What one cycle produced
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Collected { status: HealthStatus, alerts: usize, delivered: usize },
    Unavailable,
}

pub struct Monitor<C: Clock> {
    collector: MetricsCollector<C>,
    alerts: AlertGenerator,
    dispatcher: AlertDispatcher,
    store: MetricsStore,
}

impl<C: Clock> Monitor<C> {
    pub fn new(
        collector: MetricsCollector<C>,
        alerts: AlertGenerator,
        dispatcher: AlertDispatcher,
        store: MetricsStore,
    ) -> Self {
        Self { collector, alerts, dispatcher, store }
    }

    pub fn collector(&self) -> &MetricsCollector<C> {
        &self.collector
    }

    pub fn store(&self) -> &MetricsStore {
        &self.store
    }

    /// Collect without persisting or alerting
    pub async fn probe(&self, node: &Node) -> Option<HealthSnapshot> {
        self.collector.collect_metrics(node).await
    }

    pub async fn run_cycle(&self, node: &Node) -> CycleOutcome {
        let Some(snapshot) = self.collector.collect_metrics(node).await else {
            tracing::error!(node = node.name(), "node unavailable");
            return CycleOutcome::Unavailable;
        };
        if let Err(e) = self.store.append(&snapshot) {
            tracing::error!(node = node.name(), error = %e, "failed to store snapshot");
        }

        let alerts = self.alerts.check_alerts(&snapshot);
        if let Err(e) = self.store.append_alerts(&alerts) {
            tracing::error!(node = node.name(), error = %e, "failed to store alerts");
        }
        let delivered = self.dispatcher.dispatch_all(&alerts).await;

        CycleOutcome::Collected {
            status: snapshot.status.unwrap_or(HealthStatus::Critical),
            alerts: alerts.len(),
            delivered,
        }
    }

    /// Poll every node each `interval` until `shutdown` resolves, then
    /// release all connections.
    pub async fn run(
        self: Arc<Self>,
        nodes: Vec<Node>,
        interval: Duration,
        shutdown: impl Future<Output = ()>,
    ) {
        let mut tasks = JoinSet::new();
        for node in nodes {
            let monitor = Arc::clone(&self);
            tasks.spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    ticker.tick().await;
                    monitor.run_cycle(&node).await;
                }
            });
        }
        tracing::info!(nodes = tasks.len(), interval_secs = interval.as_secs(), "monitoring started");

        shutdown.await;
        tracing::info!("shutting down");
        tasks.abort_all();
        while tasks.join_next().await.is_some() {}
        self.collector.disconnect_all().await;
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
