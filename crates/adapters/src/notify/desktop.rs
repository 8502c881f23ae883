// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use ni_core::Alert;

/// Desktop notification adapter using notify-rust.
///
/// On macOS, `notify-rust` looks up a bundle identifier through AppleScript
/// on first use, which blocks forever in a process without Automation
/// permissions. The identifier is pre-set at construction time.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    fn name(&self) -> &'static str {
        "desktop"
    }

    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        let title = format!("[{}] {}", alert.level.as_str().to_uppercase(), alert.node_name);
        let body = alert.message.clone();
        // Notification::show() is synchronous; run it on the blocking pool.
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new().summary(&title).body(&body).show().map(|_| ())
        })
        .await
        .map_err(|e| NotifyError::SendFailed(format!("notification task: {e}")))?
        .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}
