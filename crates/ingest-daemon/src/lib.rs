// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ingest-daemon: the `ingestd` binary's supporting library; the thin
//! control surface an external HTTP layer binds to.

pub mod control;

pub use control::{start_session, status, stop_session, ControlError, StartedSession, StatusReport};
