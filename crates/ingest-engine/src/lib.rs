// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ingest-engine: the bounded queue, Watcher, Worker pool, Janitor loop,
//! and the Supervisor that wires them together with cancellation.

pub mod error;
pub mod janitor;
pub mod queue;
pub mod supervisor;
pub mod watcher;
pub mod worker;

pub use error::EngineError;
pub use queue::{QueueReceiver, QueueSender};
pub use supervisor::Supervisor;
pub use watcher::Watcher;
pub use worker::Worker;
