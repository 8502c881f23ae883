// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged measurement outcome.
//!
//! Inside the collector a signal is either a real reading or explicitly
//! unmeasured. Snapshots keep the sentinel encoding (`-1.0` latency) for
//! compatibility with stored history; [`Measured::into_sentinel`] and
//! [`Measured::from_latency_ms`] convert at that boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Measured<T> {
    Value(T),
    Unmeasured,
}

impl<T> Measured<T> {
    pub fn is_measured(&self) -> bool {
        matches!(self, Measured::Value(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            Measured::Value(v) => Some(v),
            Measured::Unmeasured => None,
        }
    }

    /// Collapse to a plain value, substituting `sentinel` when unmeasured
    pub fn into_sentinel(self, sentinel: T) -> T {
        self.value().unwrap_or(sentinel)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Measured<U> {
        match self {
            Measured::Value(v) => Measured::Value(f(v)),
            Measured::Unmeasured => Measured::Unmeasured,
        }
    }
}

impl<T> From<Option<T>> for Measured<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Measured::Value(v),
            None => Measured::Unmeasured,
        }
    }
}

impl Measured<f64> {
    /// Decode a latency in milliseconds; any negative value is the sentinel.
    pub fn from_latency_ms(ms: f64) -> Self {
        if ms < 0.0 || ms.is_nan() {
            Measured::Unmeasured
        } else {
            Measured::Value(ms)
        }
    }
}

#[cfg(test)]
#[path = "measured_tests.rs"]
mod tests;
