// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ni_core::{AlertLevel, AlertMetric, FakeClock, HealthStatus};
use tempfile::TempDir;

fn store() -> (TempDir, FakeClock, MetricsStore<FakeClock>) {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let store = MetricsStore::with_clock(dir.path().join("metrics"), clock.clone());
    (dir, clock, store)
}

/// Evaluated snapshot observed `age` before the clock's now
fn observed(clock: &FakeClock, node: &str, height: u64, age: Duration) -> HealthSnapshot {
    let ts = clock.now_utc() - TimeDelta::from_std(age).unwrap();
    HealthSnapshot::builder()
        .node_name(node)
        .block_height(height)
        .timestamp(ts)
        .status(HealthStatus::Healthy)
        .build()
}

const MIN: Duration = Duration::from_secs(60);

#[test]
fn empty_store_reads_empty() {
    let (_dir, _clock, store) = store();
    assert_eq!(store.count(None).unwrap(), 0);
    assert!(store.node_names().unwrap().is_empty());
    assert!(store.latest("Polkadot").unwrap().is_none());
    assert!(store.for_node("Polkadot", MIN).unwrap().is_empty());
}

#[test]
fn rejects_unevaluated_snapshot() {
    let (_dir, _clock, store) = store();
    let snapshot = HealthSnapshot::builder().node_name("Polkadot").build();

    let err = store.append(&snapshot).unwrap_err();
    assert!(matches!(err, StorageError::Unevaluated { ref node } if node == "Polkadot"));
    assert!(!store.history_path().exists());
}

#[test]
fn batch_with_one_unevaluated_writes_nothing() {
    let (_dir, clock, store) = store();
    let good = observed(&clock, "Polkadot", 1, MIN);
    let bad = HealthSnapshot::builder().node_name("Kusama").build();

    assert!(store.append_batch(&[good, bad]).is_err());
    assert_eq!(store.count(None).unwrap(), 0);
}

#[test]
fn append_round_trips_snapshot() {
    let (_dir, clock, store) = store();
    let snapshot = observed(&clock, "Polkadot", 2_150_000, Duration::ZERO);

    store.append(&snapshot).unwrap();
    assert_eq!(store.latest("Polkadot").unwrap(), Some(snapshot));
}

#[test]
fn for_node_filters_window_and_orders_newest_first() {
    let (_dir, clock, store) = store();
    store
        .append_batch(&[
            observed(&clock, "Polkadot", 1, 10 * MIN),
            observed(&clock, "Polkadot", 2, 5 * MIN),
            observed(&clock, "Kusama", 7, 2 * MIN),
            observed(&clock, "Polkadot", 3, MIN),
        ])
        .unwrap();

    let heights: Vec<u64> =
        store.for_node("Polkadot", 6 * MIN).unwrap().iter().map(|s| s.block_height).collect();
    assert_eq!(heights, vec![3, 2]);

    let all: Vec<u64> =
        store.for_node("Polkadot", 60 * MIN).unwrap().iter().map(|s| s.block_height).collect();
    assert_eq!(all, vec![3, 2, 1]);
}

#[test]
fn latest_picks_newest_timestamp() {
    let (_dir, clock, store) = store();
    store.append(&observed(&clock, "Polkadot", 5, MIN)).unwrap();
    store.append(&observed(&clock, "Polkadot", 4, 3 * MIN)).unwrap();

    assert_eq!(store.latest("Polkadot").unwrap().map(|s| s.block_height), Some(5));
}

#[test]
fn node_names_and_counts() {
    let (_dir, clock, store) = store();
    for node in ["Polkadot", "Kusama", "Polkadot"] {
        store.append(&observed(&clock, node, 1, MIN)).unwrap();
    }

    assert_eq!(store.node_names().unwrap(), vec!["Kusama".to_string(), "Polkadot".to_string()]);
    assert_eq!(store.count(None).unwrap(), 3);
    assert_eq!(store.count(Some("Polkadot")).unwrap(), 2);
    assert_eq!(store.count(Some("Westend")).unwrap(), 0);
}

#[test]
fn skips_corrupt_lines() {
    let (_dir, clock, store) = store();
    store.append(&observed(&clock, "Polkadot", 1, MIN)).unwrap();
    {
        let mut file = OpenOptions::new().append(true).open(store.history_path()).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();
    }
    store.append(&observed(&clock, "Polkadot", 2, Duration::ZERO)).unwrap();

    assert_eq!(store.count(None).unwrap(), 2);
}

#[test]
fn older_lines_without_finality_flag_still_parse() {
    let (_dir, clock, store) = store();
    let mut value = serde_json::to_value(observed(&clock, "Polkadot", 9, MIN)).unwrap();
    value.as_object_mut().unwrap().remove("finality_measured");
    fs::create_dir_all(store.dir()).unwrap();
    fs::write(store.history_path(), format!("{value}\n")).unwrap();

    let latest = store.latest("Polkadot").unwrap().unwrap();
    assert!(latest.finality_measured);
}

#[test]
fn rotates_past_size_limit() {
    let (_dir, clock, store) = store();
    let store = store.with_max_size(1);
    let path = store.history_path().display().to_string();

    for height in 1..=5 {
        store.append(&observed(&clock, "Polkadot", height, MIN)).unwrap();
    }

    // Live file holds only the last append; three rotations kept
    assert_eq!(store.count(None).unwrap(), 1);
    assert_eq!(store.latest("Polkadot").unwrap().map(|s| s.block_height), Some(5));
    for i in 1..=3 {
        assert!(Path::new(&format!("{path}.{i}")).exists(), "missing rotation .{i}");
    }
    assert!(!Path::new(&format!("{path}.4")).exists());
}

#[test]
fn alerts_are_appended_separately() {
    let (_dir, clock, store) = store();
    let alert = Alert {
        level: AlertLevel::Warning,
        message: "Peer count is 3 (minimum: 5)".to_string(),
        timestamp: clock.now_utc(),
        node_name: "Kusama".to_string(),
        metric: AlertMetric::PeersCount,
    };

    store.append_alerts(&[]).unwrap();
    assert!(!store.alerts_path().exists());

    store.append_alerts(std::slice::from_ref(&alert)).unwrap();
    assert_eq!(store.alerts().unwrap(), vec![alert]);
    assert_eq!(store.count(None).unwrap(), 0);

    let raw = fs::read_to_string(store.alerts_path()).unwrap();
    assert!(raw.contains("\"metric_name\":\"peers_count\""));
}
