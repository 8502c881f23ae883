// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Substrate/Polkadot node client over JSON-RPC.
//!
//! | query                 | calls                                                   |
//! |-----------------------|---------------------------------------------------------|
//! | chain head            | `chain_getHeader`, `chain_getBlockHash(number)`         |
//! | finalized number      | `chain_getFinalizedHead`, `chain_getHeader(hash)`       |
//! | finalized timestamp   | `chain_getFinalizedHead`, `state_getStorage(Now, hash)` |
//! | peers                 | `system_peers`                                          |
//! | latency               | `system_health`, timed from send to matching reply      |

use super::rpc::RpcSocket;
use super::{ChainClient, ChainConnector, ChainError, ChainHead};
use async_trait::async_trait;
use ni_core::Node;
use serde_json::{json, Value};
use std::sync::Arc;

/// Storage key of `Timestamp::Now`: twox128("Timestamp") ++ twox128("Now")
pub const TIMESTAMP_NOW_KEY: &str =
    "0xf0c365c3cf59d671eb72da0e7a4113c49f1f0515f462cdcf84e0f1d6045dfcbb";

/// Opens a [`SubstrateClient`] per node over `ws://` or `wss://`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstrateConnector;

#[async_trait]
impl ChainConnector for SubstrateConnector {
    async fn connect(&self, node: &Node) -> Result<Arc<dyn ChainClient>, ChainError> {
        let client = SubstrateClient::connect(node.rpc_url()).await?;
        tracing::info!(node = %node.name(), url = %node.rpc_url(), "connected");
        Ok(Arc::new(client))
    }
}

pub struct SubstrateClient {
    url: String,
    socket: RpcSocket,
}

impl SubstrateClient {
    pub async fn connect(url: &str) -> Result<Self, ChainError> {
        let socket = RpcSocket::connect(url).await?;
        Ok(Self { url: url.to_string(), socket })
    }

    async fn finalized_hash(&self) -> Result<String, ChainError> {
        let value = self.socket.call("chain_getFinalizedHead", json!([])).await?;
        as_string(value, "chain_getFinalizedHead")
    }

    async fn header_number(&self, params: Value) -> Result<u64, ChainError> {
        let header = self.socket.call("chain_getHeader", params).await?;
        let number = header
            .get("number")
            .and_then(Value::as_str)
            .ok_or_else(|| ChainError::Decode("header without number".to_string()))?;
        parse_hex_u64(number)
    }
}

#[async_trait]
impl ChainClient for SubstrateClient {
    async fn chain_head(&self) -> Result<ChainHead, ChainError> {
        let block_height = self.header_number(json!([])).await?;
        let hash = self.socket.call("chain_getBlockHash", json!([block_height])).await?;
        Ok(ChainHead { block_height, block_hash: as_string(hash, "chain_getBlockHash")? })
    }

    async fn finalized_block_number(&self) -> Result<u64, ChainError> {
        let hash = self.finalized_hash().await?;
        self.header_number(json!([hash])).await
    }

    async fn finalized_block_timestamp(&self) -> Result<u64, ChainError> {
        let hash = self.finalized_hash().await?;
        let raw = self.socket.call("state_getStorage", json!([TIMESTAMP_NOW_KEY, hash])).await?;
        decode_timestamp(&as_string(raw, "state_getStorage")?)
    }

    async fn peers_count(&self) -> Result<u32, ChainError> {
        match self.socket.call("system_peers", json!([])).await {
            Ok(Value::Array(peers)) => Ok(peers.len() as u32),
            Ok(_) => Ok(0),
            // Public endpoints reject unsafe RPCs; that is not a failure.
            Err(ChainError::Rpc { code, message }) => {
                tracing::debug!(url = %self.url, code, %message, "system_peers unavailable");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    async fn measure_rpc_latency(&self) -> Result<f64, ChainError> {
        let (_, elapsed) = self.socket.call_timed("system_health", json!([])).await?;
        Ok(elapsed.as_secs_f64() * 1000.0)
    }

    async fn disconnect(&self) {
        self.socket.close().await;
        tracing::info!(url = %self.url, "disconnected");
    }
}

fn as_string(value: Value, method: &str) -> Result<String, ChainError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ChainError::Decode(format!("{method}: expected string, got {other}"))),
    }
}

/// Parse a `0x`-prefixed big-endian hex quantity.
pub(crate) fn parse_hex_u64(s: &str) -> Result<u64, ChainError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(ChainError::Decode(format!("empty hex number: {s:?}")));
    }
    u64::from_str_radix(digits, 16).map_err(|e| ChainError::Decode(format!("hex {s:?}: {e}")))
}

/// Decode a SCALE-encoded `u64` (8 bytes, little endian, hex with `0x`).
pub(crate) fn decode_timestamp(s: &str) -> Result<u64, ChainError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != 16 || !digits.is_ascii() {
        return Err(ChainError::Decode(format!("timestamp storage is not 8 bytes: {s:?}")));
    }
    let mut bytes = [0u8; 8];
    for (i, byte) in bytes.iter_mut().enumerate() {
        let pair = &digits[i * 2..i * 2 + 2];
        *byte = u8::from_str_radix(pair, 16)
            .map_err(|e| ChainError::Decode(format!("timestamp byte {pair:?}: {e}")))?;
    }
    Ok(u64::from_le_bytes(bytes))
}

#[cfg(test)]
#[path = "substrate_tests.rs"]
mod tests;
