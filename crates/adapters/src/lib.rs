// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ni-adapters: capabilities the inspector consumes.
//!
//! - [`chain`]: connecting to a node and issuing the chain queries a probe
//!   cycle needs
//! - [`notify`]: delivering alerts to operators

pub mod chain;
pub mod notify;

pub use chain::{
    ChainClient, ChainConnector, ChainError, ChainHead, SubstrateClient, SubstrateConnector,
};
pub use notify::{
    DesktopNotifyAdapter, LogNotifyAdapter, NotifyAdapter, NotifyError, SlackNotifyAdapter,
};

#[cfg(any(test, feature = "test-support"))]
pub use chain::{ChainCall, FakeChainClient, FakeChainConnector};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
