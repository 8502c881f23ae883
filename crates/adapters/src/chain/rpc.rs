// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-RPC 2.0 over a WebSocket.
//!
//! Requests share one socket without waiting on each other: writers hold
//! the sink only while sending, and a reader task routes each reply to its
//! caller by `id`. Frames with no waiting caller (late replies to abandoned
//! requests, subscription notifications) are dropped.

use super::ChainError;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type Waiters = HashMap<u64, oneshot::Sender<Result<Value, ChainError>>>;

/// Callers waiting for a reply, keyed by request id. `None` once the
/// socket is gone; new calls then fail with [`ChainError::Closed`].
type Pending = Arc<parking_lot::Mutex<Option<Waiters>>>;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    pub fn into_result(self) -> Result<Value, ChainError> {
        if let Some(err) = self.error {
            return Err(ChainError::Rpc { code: err.code, message: err.message });
        }
        // `null` is a legitimate result (e.g. missing storage)
        Ok(self.result.unwrap_or(Value::Null))
    }
}

pub(super) fn encode_request(id: u64, method: &str, params: &Value) -> Result<String, ChainError> {
    serde_json::to_string(&RpcRequest { jsonrpc: "2.0", id, method, params })
        .map_err(|e| ChainError::Decode(format!("encode {method}: {e}")))
}

pub(super) fn decode_response(text: &str) -> Result<RpcResponse, ChainError> {
    serde_json::from_str(text).map_err(|e| ChainError::Decode(format!("invalid response: {e}")))
}

/// A connected JSON-RPC socket.
pub(super) struct RpcSocket {
    sink: Mutex<Option<WsSink>>,
    pending: Pending,
    reader: parking_lot::Mutex<Option<JoinHandle<()>>>,
    next_id: AtomicU64,
}

impl RpcSocket {
    pub async fn connect(url: &str) -> Result<Self, ChainError> {
        let (stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| ChainError::Connect(format!("{url}: {e}")))?;
        let (sink, stream) = stream.split();
        let pending: Pending = Arc::new(parking_lot::Mutex::new(Some(HashMap::new())));
        let reader = tokio::spawn(read_loop(stream, Arc::clone(&pending)));
        Ok(Self {
            sink: Mutex::new(Some(sink)),
            pending,
            reader: parking_lot::Mutex::new(Some(reader)),
            next_id: AtomicU64::new(1),
        })
    }

    /// Issue one call and wait for its reply.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        self.call_timed(method, params).await.map(|(value, _)| value)
    }

    /// Like [`RpcSocket::call`], also returning the round trip from the
    /// moment the request goes out to its matching reply.
    pub async fn call_timed(
        &self,
        method: &str,
        params: Value,
    ) -> Result<(Value, Duration), ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = encode_request(id, method, &params)?;

        let (tx, rx) = oneshot::channel();
        match self.pending.lock().as_mut() {
            Some(waiters) => {
                waiters.insert(id, tx);
            }
            None => return Err(ChainError::Closed),
        }
        let _waiting = Waiting { pending: &self.pending, id };

        let started = {
            let mut sink = self.sink.lock().await;
            let sink = sink.as_mut().ok_or(ChainError::Closed)?;
            let started = Instant::now();
            sink.send(Message::Text(request.into()))
                .await
                .map_err(|e| ChainError::Transport(format!("send {method}: {e}")))?;
            started
        };

        let value = rx.await.map_err(|_| ChainError::Closed)??;
        Ok((value, started.elapsed()))
    }

    pub async fn close(&self) {
        if let Some(mut sink) = self.sink.lock().await.take() {
            if let Err(e) = sink.close().await {
                tracing::debug!(error = %e, "rpc socket close failed");
            }
        }
        if let Some(reader) = self.reader.lock().take() {
            reader.abort();
        }
        fail_waiters(&self.pending, ChainError::Closed);
    }
}

impl Drop for RpcSocket {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.lock().take() {
            reader.abort();
        }
    }
}

/// Deregisters a caller that gave up (timed out or dropped) before its
/// reply arrived.
struct Waiting<'a> {
    pending: &'a Pending,
    id: u64,
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        if let Some(waiters) = self.pending.lock().as_mut() {
            waiters.remove(&self.id);
        }
    }
}

async fn read_loop(mut stream: SplitStream<WsStream>, pending: Pending) {
    let reason = loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => route_reply(&pending, &text),
            Some(Ok(Message::Close(frame))) => {
                tracing::debug!(?frame, "rpc socket closed by peer");
                break ChainError::Closed;
            }
            Some(Ok(_)) => {} // tungstenite answers pings itself
            Some(Err(e)) => break ChainError::Transport(format!("recv: {e}")),
            None => break ChainError::Closed,
        }
    };
    fail_waiters(&pending, reason);
}

fn route_reply(pending: &Pending, text: &str) {
    let response = match decode_response(text) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "dropping undecodable frame");
            return;
        }
    };
    let Some(id) = response.id else {
        tracing::trace!("dropping notification");
        return;
    };
    let waiter = pending.lock().as_mut().and_then(|waiters| waiters.remove(&id));
    match waiter {
        Some(tx) => {
            let _ = tx.send(response.into_result());
        }
        None => tracing::trace!(id, "dropping stale frame"),
    }
}

/// Close the socket for new calls and fail every waiting caller.
fn fail_waiters(pending: &Pending, reason: ChainError) {
    let waiters = pending.lock().take();
    for (_, tx) in waiters.into_iter().flatten() {
        let _ = tx.send(Err(reason.clone()));
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
