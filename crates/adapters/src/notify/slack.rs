// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slack incoming-webhook delivery.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use ni_core::{Alert, AlertLevel};
use serde_json::{json, Value};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct SlackNotifyAdapter {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackNotifyAdapter {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::SendFailed(format!("http client: {e}")))?;
        Ok(Self { webhook_url: webhook_url.into(), client })
    }
}

#[async_trait]
impl NotifyAdapter for SlackNotifyAdapter {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&build_payload(alert))
            .send()
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected { status: status.as_u16() });
        }
        tracing::info!(node = %alert.node_name, metric = %alert.metric, "slack alert sent");
        Ok(())
    }
}

fn emoji(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Critical => "\u{1F534}",
        AlertLevel::Warning => "\u{1F7E1}",
        AlertLevel::Info => "\u{1F7E2}",
    }
}

fn color(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Critical => "#FF0000",
        AlertLevel::Warning => "#FFA500",
        AlertLevel::Info => "#00FF00",
    }
}

/// Webhook body: headline text plus one attachment with the alert fields.
pub(crate) fn build_payload(alert: &Alert) -> Value {
    let level = alert.level.as_str().to_uppercase();
    json!({
        "text": format!("{} {} Alert", emoji(alert.level), level),
        "attachments": [{
            "color": color(alert.level),
            "title": format!("Node: {}", alert.node_name),
            "fields": [
                { "title": "Metric", "value": alert.metric.as_str(), "short": true },
                { "title": "Level", "value": level, "short": true },
                { "title": "Details", "value": alert.message, "short": false },
                { "title": "Timestamp", "value": alert.timestamp.to_rfc3339(), "short": false },
            ],
        }],
    })
}

#[cfg(test)]
#[path = "slack_tests.rs"]
mod tests;
