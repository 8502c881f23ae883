// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of alerts to every configured notification channel.

use futures_util::future::join_all;
use ni_adapters::NotifyAdapter;
use ni_core::Alert;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct AlertDispatcher {
    channels: Vec<Arc<dyn NotifyAdapter>>,
}

impl AlertDispatcher {
    pub fn new(channels: Vec<Arc<dyn NotifyAdapter>>) -> Self {
        Self { channels }
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Send to all channels concurrently. Returns true only when every
    /// channel accepted the alert; failures are logged, not returned.
    pub async fn dispatch(&self, alert: &Alert) -> bool {
        let results = join_all(self.channels.iter().map(|channel| async move {
            match channel.send(alert).await {
                Ok(()) => true,
                Err(error) => {
                    tracing::error!(
                        channel = channel.name(),
                        node = %alert.node_name,
                        metric = %alert.metric,
                        %error,
                        "alert delivery failed"
                    );
                    false
                }
            }
        }))
        .await;
        results.into_iter().all(|ok| ok)
    }

    /// Dispatch each alert in order; returns how many were fully delivered.
    pub async fn dispatch_all(&self, alerts: &[Alert]) -> usize {
        let mut delivered = 0;
        for alert in alerts {
            if self.dispatch(alert).await {
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
