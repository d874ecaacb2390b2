// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identity, naming, and the shared mutable session state.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while validating or transitioning session state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session_name must match [A-Za-z0-9_.-]+, got: {0}")]
    InvalidName(String),
    #[error("session already active")]
    AlreadyActive,
}

/// Validate a caller-supplied session name against `[A-Za-z0-9_.-]+`.
pub fn validate_session_name(name: &str) -> Result<(), SessionError> {
    if !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
    {
        Ok(())
    } else {
        Err(SessionError::InvalidName(name.to_string()))
    }
}

/// Generate an auto session name: `00-session-<uuidv7>`.
///
/// The `00-` prefix and the time-ordered UUIDv7 both sort lexically ahead
/// of (or consistently with) temporal order, which Recovery relies on to
/// pick the most recent session.
pub fn generate_session_name() -> String {
    format!("00-session-{}", Uuid::now_v7())
}

/// The process-singleton, mutable session record.
///
/// The `active`/`session_name`/`date_prefix` triple is guarded by a mutex
/// (single writer: the control surface and Recovery); the counters are
/// independent atomics so workers never contend with the control path for
/// the hot-path increment. Readers may observe the triple and the counters
/// at slightly different points in time; transactional consistency
/// between them is not required.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: Mutex<SessionIdentity>,
    processed_ok: AtomicU64,
    processed_err: AtomicU64,
    last_error: Mutex<Option<String>>,
}

#[derive(Debug, Default, Clone)]
struct SessionIdentity {
    active: bool,
    session_name: Option<String>,
    date_prefix: Option<String>,
}

/// A consistent point-in-time snapshot of the identity triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub active: bool,
    pub session_name: Option<String>,
    pub date_prefix: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition Idle -> Active. Fails if already active.
    pub fn start(&self, session_name: String, date_prefix: String) -> Result<(), SessionError> {
        let mut id = self.inner.lock();
        if id.active {
            return Err(SessionError::AlreadyActive);
        }
        id.active = true;
        id.session_name = Some(session_name);
        id.date_prefix = Some(date_prefix);
        Ok(())
    }

    /// Set inactive. Names are preserved so in-flight workers (and a
    /// subsequent Recovery run) can still resolve this session's paths.
    pub fn stop(&self) {
        self.inner.lock().active = false;
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().active
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let id = self.inner.lock();
        SessionSnapshot {
            active: id.active,
            session_name: id.session_name.clone(),
            date_prefix: id.date_prefix.clone(),
        }
    }

    pub fn record_success(&self) {
        self.processed_ok.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, error: String) {
        self.processed_err.fetch_add(1, Ordering::Relaxed);
        *self.last_error.lock() = Some(error);
    }

    pub fn processed_ok(&self) -> u64 {
        self.processed_ok.load(Ordering::Relaxed)
    }

    pub fn processed_err(&self) -> u64 {
        self.processed_err.load(Ordering::Relaxed)
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
