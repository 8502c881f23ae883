// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert delivery adapters.

mod desktop;
mod slack;

pub use desktop::DesktopNotifyAdapter;
pub use slack::SlackNotifyAdapter;

use async_trait::async_trait;
use ni_core::Alert;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("rejected with HTTP {status}")]
    Rejected { status: u16 },
}

/// Adapter for delivering alerts to operators
#[async_trait]
pub trait NotifyAdapter: Send + Sync + 'static {
    /// Short channel name for logs
    fn name(&self) -> &'static str;

    async fn send(&self, alert: &Alert) -> Result<(), NotifyError>;
}

/// Writes alerts to the tracing log. Used when no other channel is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifyAdapter;

#[async_trait]
impl NotifyAdapter for LogNotifyAdapter {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        tracing::warn!(
            target: "ni::alerts",
            node = %alert.node_name,
            level = %alert.level,
            metric = %alert.metric,
            timestamp = %alert.timestamp.to_rfc3339(),
            "{}",
            alert.message
        );
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use ni_core::Alert;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeNotifyState {
        sent: Vec<Alert>,
        failing: bool,
    }

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make subsequent sends fail (the alert is still recorded)
        pub fn set_failing(&self, failing: bool) {
            self.inner.lock().failing = failing;
        }

        /// Get all alerts handed to this adapter
        pub fn sent(&self) -> Vec<Alert> {
            self.inner.lock().sent.clone()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
            let mut state = self.inner.lock();
            state.sent.push(alert.clone());
            if state.failing {
                return Err(NotifyError::SendFailed("injected failure".to_string()));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
