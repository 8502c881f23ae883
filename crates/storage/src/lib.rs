// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for the node inspector: append-only JSONL history

mod history;

pub use history::{MetricsStore, StorageError, ALERTS_FILE, HISTORY_FILE, MAX_HISTORY_SIZE};
