// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable chain client for tests.

use super::{ChainClient, ChainConnector, ChainError, ChainHead};
use async_trait::async_trait;
use ni_core::Node;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Recorded chain client call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainCall {
    ChainHead,
    FinalizedNumber,
    FinalizedTimestamp,
    Peers,
    Latency,
    Disconnect,
}

#[derive(Clone)]
enum Behavior {
    Reply,
    Fail(ChainError),
    /// Never completes
    Hang,
    /// Completes after a delay
    Delay(Duration),
}

struct FakeChainState {
    head: ChainHead,
    finalized_number: u64,
    finalized_timestamp_ms: u64,
    peers: u32,
    latency_ms: f64,
    behaviors: HashMap<ChainCall, Behavior>,
    /// Remaining failures before `Reply` resumes, per call
    transient_failures: HashMap<ChainCall, u32>,
    calls: Vec<ChainCall>,
    disconnects: u32,
}

/// Fake chain client; clones share state
#[derive(Clone)]
pub struct FakeChainClient {
    inner: Arc<Mutex<FakeChainState>>,
}

impl Default for FakeChainClient {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeChainState {
                head: ChainHead { block_height: 1_000, block_hash: "0xhead".to_string() },
                finalized_number: 997,
                finalized_timestamp_ms: 0,
                peers: 50,
                latency_ms: 50.0,
                behaviors: HashMap::new(),
                transient_failures: HashMap::new(),
                calls: Vec::new(),
                disconnects: 0,
            })),
        }
    }
}

impl FakeChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_head(&self, block_height: u64) {
        self.inner.lock().head =
            ChainHead { block_height, block_hash: format!("0x{block_height:x}") };
    }

    pub fn set_finalized_number(&self, n: u64) {
        self.inner.lock().finalized_number = n;
    }

    pub fn set_finalized_timestamp_ms(&self, ms: u64) {
        self.inner.lock().finalized_timestamp_ms = ms;
    }

    pub fn set_peers(&self, n: u32) {
        self.inner.lock().peers = n;
    }

    pub fn set_latency_ms(&self, ms: f64) {
        self.inner.lock().latency_ms = ms;
    }

    /// Make every call of this kind fail
    pub fn fail(&self, call: ChainCall, error: ChainError) {
        self.inner.lock().behaviors.insert(call, Behavior::Fail(error));
    }

    /// Fail the next `times` calls of this kind, then reply normally
    pub fn fail_times(&self, call: ChainCall, times: u32) {
        self.inner.lock().transient_failures.insert(call, times);
    }

    /// Make every call of this kind hang forever
    pub fn hang(&self, call: ChainCall) {
        self.inner.lock().behaviors.insert(call, Behavior::Hang);
    }

    pub fn delay(&self, call: ChainCall, by: Duration) {
        self.inner.lock().behaviors.insert(call, Behavior::Delay(by));
    }

    pub fn calls(&self) -> Vec<ChainCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self, call: ChainCall) -> usize {
        self.inner.lock().calls.iter().filter(|c| **c == call).count()
    }

    pub fn disconnects(&self) -> u32 {
        self.inner.lock().disconnects
    }

    async fn enter(&self, call: ChainCall) -> Result<(), ChainError> {
        let behavior = {
            let mut state = self.inner.lock();
            state.calls.push(call);
            if let Some(remaining) = state.transient_failures.get_mut(&call) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(ChainError::Transport(format!("injected {call:?} failure")));
                }
            }
            state.behaviors.get(&call).cloned().unwrap_or(Behavior::Reply)
        };
        match behavior {
            Behavior::Reply => Ok(()),
            Behavior::Fail(e) => Err(e),
            Behavior::Hang => std::future::pending().await,
            Behavior::Delay(by) => {
                tokio::time::sleep(by).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl ChainClient for FakeChainClient {
    async fn chain_head(&self) -> Result<ChainHead, ChainError> {
        self.enter(ChainCall::ChainHead).await?;
        Ok(self.inner.lock().head.clone())
    }

    async fn finalized_block_number(&self) -> Result<u64, ChainError> {
        self.enter(ChainCall::FinalizedNumber).await?;
        Ok(self.inner.lock().finalized_number)
    }

    async fn finalized_block_timestamp(&self) -> Result<u64, ChainError> {
        self.enter(ChainCall::FinalizedTimestamp).await?;
        Ok(self.inner.lock().finalized_timestamp_ms)
    }

    async fn peers_count(&self) -> Result<u32, ChainError> {
        self.enter(ChainCall::Peers).await?;
        Ok(self.inner.lock().peers)
    }

    async fn measure_rpc_latency(&self) -> Result<f64, ChainError> {
        self.enter(ChainCall::Latency).await?;
        Ok(self.inner.lock().latency_ms)
    }

    async fn disconnect(&self) {
        let mut state = self.inner.lock();
        state.calls.push(ChainCall::Disconnect);
        state.disconnects += 1;
    }
}

struct FakeConnectorState {
    clients: HashMap<String, FakeChainClient>,
    connects: HashMap<String, u32>,
    refuse: bool,
    connect_delay: Option<Duration>,
}

/// Fake connector handing out one [`FakeChainClient`] per node name
#[derive(Clone)]
pub struct FakeChainConnector {
    inner: Arc<Mutex<FakeConnectorState>>,
}

impl Default for FakeChainConnector {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeConnectorState {
                clients: HashMap::new(),
                connects: HashMap::new(),
                refuse: false,
                connect_delay: None,
            })),
        }
    }
}

impl FakeChainConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client handed out for `name`, created on first use
    pub fn client(&self, name: &str) -> FakeChainClient {
        self.inner.lock().clients.entry(name.to_string()).or_default().clone()
    }

    pub fn refuse_connections(&self, refuse: bool) {
        self.inner.lock().refuse = refuse;
    }

    pub fn set_connect_delay(&self, delay: Duration) {
        self.inner.lock().connect_delay = Some(delay);
    }

    pub fn connect_count(&self, name: &str) -> u32 {
        self.inner.lock().connects.get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ChainConnector for FakeChainConnector {
    async fn connect(&self, node: &Node) -> Result<Arc<dyn ChainClient>, ChainError> {
        let delay = self.inner.lock().connect_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.inner.lock();
        *state.connects.entry(node.name().to_string()).or_default() += 1;
        if state.refuse {
            return Err(ChainError::Connect(format!("{} refused", node.rpc_url())));
        }
        let client = state.clients.entry(node.name().to_string()).or_default().clone();
        Ok(Arc::new(client))
    }
}
