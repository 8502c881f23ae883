// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded execution of fallible chain operations.
//!
//! The executor is the only place a failed or hung operation becomes a
//! value: callers hand it a fallback and always get a `T` back. Failures
//! surface as log events, never as errors.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Pause between retry attempts
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

enum Failure {
    TimedOut,
    Failed(String),
}

/// Runs operations under a timeout, substituting a fallback on failure.
#[derive(Debug, Clone, Copy)]
pub struct Executor {
    backoff: Duration,
}

impl Default for Executor {
    fn default() -> Self {
        Self { backoff: DEFAULT_BACKOFF }
    }
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Await `op` for at most `timeout`.
    ///
    /// A timeout logs a warning and an error result logs an error; both
    /// return `fallback`. The abandoned future is dropped.
    pub async fn run_with_timeout<T, E, F>(
        &self,
        label: &str,
        timeout: Duration,
        fallback: T,
        op: F,
    ) -> T
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        match attempt(timeout, op).await {
            Ok(value) => value,
            Err(Failure::TimedOut) => {
                tracing::warn!(
                    operation = label,
                    timeout_ms = timeout.as_millis() as u64,
                    "timed out, using fallback"
                );
                fallback
            }
            Err(Failure::Failed(error)) => {
                tracing::error!(operation = label, %error, "failed, using fallback");
                fallback
            }
        }
    }

    /// Like [`Executor::run_with_timeout`], but makes up to
    /// `max_retries + 1` attempts, sleeping the backoff between them.
    pub async fn run_with_retry<T, E, F, Fut>(
        &self,
        label: &str,
        max_retries: u32,
        timeout: Duration,
        fallback: T,
        mut op: F,
    ) -> T
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let attempts = max_retries.saturating_add(1);
        for n in 1..=attempts {
            match attempt(timeout, op()).await {
                Ok(value) => {
                    if n > 1 {
                        tracing::info!(operation = label, attempt = n, "succeeded on attempt {n}");
                    }
                    return value;
                }
                Err(Failure::TimedOut) => tracing::warn!(
                    operation = label,
                    attempt = n,
                    attempts,
                    timeout_ms = timeout.as_millis() as u64,
                    "attempt timed out"
                ),
                Err(Failure::Failed(error)) => tracing::warn!(
                    operation = label,
                    attempt = n,
                    attempts,
                    %error,
                    "attempt failed"
                ),
            }
            if n < attempts {
                tokio::time::sleep(self.backoff).await;
            }
        }
        tracing::error!(operation = label, attempts, "All retries failed, using fallback");
        fallback
    }
}

async fn attempt<T, E, F>(timeout: Duration, op: F) -> Result<T, Failure>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(timeout, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Failure::Failed(e.to_string())),
        Err(_) => Err(Failure::TimedOut),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
