// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ni_core::{AlertMetric, Clock, FakeClock};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn alert(level: AlertLevel) -> Alert {
    Alert {
        level,
        message: "Finality lag is 75 blocks (threshold: 50)".to_string(),
        timestamp: FakeClock::new().now_utc(),
        node_name: "Polkadot".to_string(),
        metric: AlertMetric::FinalityLag,
    }
}

#[test]
fn payload_shape() {
    let payload = build_payload(&alert(AlertLevel::Critical));
    assert_eq!(payload["text"], "\u{1F534} CRITICAL Alert");

    let attachment = &payload["attachments"][0];
    assert_eq!(attachment["color"], "#FF0000");
    assert_eq!(attachment["title"], "Node: Polkadot");

    let fields = attachment["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0]["value"], "finality_lag");
    assert_eq!(fields[1]["value"], "CRITICAL");
    assert_eq!(fields[2]["value"], "Finality lag is 75 blocks (threshold: 50)");
    assert_eq!(fields[3]["value"], "2023-11-14T22:13:20+00:00");
}

#[yare::parameterized(
    critical = { AlertLevel::Critical, "#FF0000" },
    warning  = { AlertLevel::Warning,  "#FFA500" },
    info     = { AlertLevel::Info,     "#00FF00" },
)]
fn payload_color_by_level(level: AlertLevel, expected: &str) {
    assert_eq!(build_payload(&alert(level))["attachments"][0]["color"], expected);
}

/// One-shot HTTP server answering every request with `status`.
async fn spawn_webhook(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = vec![0u8; 8192];
            let _ = stream.read(&mut buf).await;
            let response =
                format!("HTTP/1.1 {status} X\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok");
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{addr}/hook")
}

#[tokio::test]
async fn send_succeeds_on_2xx() {
    let url = spawn_webhook(200).await;
    let adapter = SlackNotifyAdapter::new(url).unwrap();
    adapter.send(&alert(AlertLevel::Warning)).await.unwrap();
}

#[tokio::test]
async fn send_reports_rejection_status() {
    let url = spawn_webhook(500).await;
    let adapter = SlackNotifyAdapter::new(url).unwrap();
    let err = adapter.send(&alert(AlertLevel::Warning)).await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected { status: 500 }));
}
