// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chain client capability.
//!
//! A [`ChainConnector`] turns a [`Node`] into a live [`ChainClient`] handle.
//! Every client call may fail or hang; callers bound them with their own
//! timeouts, nothing here retries.

mod rpc;
mod substrate;

pub use substrate::{SubstrateClient, SubstrateConnector};

use async_trait::async_trait;
use ni_core::Node;
use std::sync::Arc;
use thiserror::Error;

/// Errors from chain client operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("connection closed")]
    Closed,
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

/// Current best block as seen by the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHead {
    pub block_height: u64,
    pub block_hash: String,
}

/// Live connection to one node.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
    async fn chain_head(&self) -> Result<ChainHead, ChainError>;

    async fn finalized_block_number(&self) -> Result<u64, ChainError>;

    /// Finalized block's timestamp in milliseconds since the Unix epoch
    async fn finalized_block_timestamp(&self) -> Result<u64, ChainError>;

    /// Connected peer count. Endpoints that hide peer introspection report
    /// `Ok(0)`, not an error.
    async fn peers_count(&self) -> Result<u32, ChainError>;

    /// Round-trip time of a minimal request, in milliseconds
    async fn measure_rpc_latency(&self) -> Result<f64, ChainError>;

    /// Release the connection. Safe to call more than once.
    async fn disconnect(&self);
}

/// Factory for [`ChainClient`] handles.
#[async_trait]
pub trait ChainConnector: Send + Sync + 'static {
    async fn connect(&self, node: &Node) -> Result<Arc<dyn ChainClient>, ChainError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChainCall, FakeChainClient, FakeChainConnector};
