// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin async control surface over `SessionState`/`Config`. No HTTP
//! framework is introduced here; an external HTTP layer binds its
//! `/v1/watch/start`, `/v1/watch/stop`, and `/v1/status` handlers directly
//! to these functions.

use ingest_core::{validate_session_name, Clock, Config, SessionError, SessionState};
use ingest_storage::ensure_session_dirs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("session already active")]
    AlreadyActive,
    #[error("invalid session_name: {0}")]
    InvalidName(String),
    #[error(transparent)]
    Storage(#[from] ingest_storage::StorageError),
}

impl From<SessionError> for ControlError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AlreadyActive => ControlError::AlreadyActive,
            SessionError::InvalidName(name) => ControlError::InvalidName(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedSession {
    pub session_name: String,
    pub date_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub enabled: bool,
    pub active_session: Option<String>,
    pub processed_ok: u64,
    pub processed_err: u64,
    pub last_error: Option<String>,
}

/// Start a new session: validate or generate the name, capture today's UTC
/// date, create the directory trees, and flip `SessionState` to active.
///
/// Fails with [`ControlError::AlreadyActive`] if a session is already
/// running; the caller must stop it first.
pub async fn start_session<C: Clock>(
    session: &SessionState,
    cfg: &Config,
    clock: &C,
    requested_name: Option<String>,
) -> Result<StartedSession, ControlError> {
    let name = match requested_name {
        Some(name) => {
            validate_session_name(&name)?;
            name
        }
        None => ingest_core::generate_session_name(),
    };
    let date_prefix = clock.today_utc();

    // `SessionState::start` is the single point of synchronization: it
    // atomically claims the active flag, so two concurrent start requests
    // can race up to here but only one sees `Ok`.
    session.start(name.clone(), date_prefix.clone())?;

    if let Err(err) = ensure_session_dirs(cfg, &date_prefix, &name).await {
        session.stop();
        return Err(err.into());
    }

    Ok(StartedSession {
        session_name: name,
        date_prefix,
    })
}

/// Stop the active session. Idempotent: stopping an already-inactive
/// session is not an error. Names are preserved on `SessionState` so
/// draining workers and a subsequent Recovery run can still resolve paths.
pub async fn stop_session(session: &SessionState) {
    session.stop();
}

/// Snapshot session state and processing counters for a status probe.
pub async fn status(session: &SessionState) -> StatusReport {
    let snapshot = session.snapshot();
    StatusReport {
        enabled: snapshot.active,
        active_session: snapshot.session_name,
        processed_ok: session.processed_ok(),
        processed_err: session.processed_err(),
        last_error: session.last_error(),
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
