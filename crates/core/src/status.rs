// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health verdicts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verdict for one signal or for a whole node.
///
/// Variants are declared in severity order so `Ord` ranks
/// `Healthy < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown health status: {0}")]
pub struct UnknownStatus(pub String);

crate::string_enum! {
    HealthStatus, UnknownStatus {
        Healthy => "healthy",
        Warning => "warning",
        Critical => "critical",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
