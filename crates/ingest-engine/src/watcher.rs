// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The NFS polling loop: scans the active session's `incoming/` directory
//! and enqueues files that have been stable for at least `min_file_age`.
//!
//! Size+mtime stability across one poll interval, plus an absolute age
//! threshold, is a pragmatic "file is done being written" heuristic for an
//! NFS producer that never signals completion explicitly.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use ingest_core::{Clock, Config, SessionState, WorkItem};
use ingest_storage::{scan_directory, ScanMap, StorageError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::queue::QueueSender;

const MIN_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

pub struct Watcher<C: Clock> {
    cfg: Arc<Config>,
    session: Arc<SessionState>,
    queue: QueueSender,
    clock: C,
    previous: ScanMap,
    pending: HashSet<String>,
    backoff: Duration,
}

impl<C: Clock> Watcher<C> {
    pub fn new(cfg: Arc<Config>, session: Arc<SessionState>, queue: QueueSender, clock: C) -> Self {
        Self {
            cfg,
            session,
            queue,
            clock,
            previous: ScanMap::new(),
            pending: HashSet::new(),
            backoff: Duration::ZERO,
        }
    }

    /// Run until `cancel` fires. Sleeps `poll_interval + backoff` between
    /// cycles; the sleep happens unconditionally, even while inactive, so
    /// a newly-started session is picked up within one poll interval.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            let sleep_for = self.cfg.poll_interval + self.backoff;
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(sleep_for) => {}
            }
            if !self.tick().await {
                break;
            }
        }
    }

    /// Run a single poll cycle. Returns `false` if the queue's receiver
    /// has been dropped (the pipeline is shutting down) and the caller
    /// should stop looping.
    pub async fn tick(&mut self) -> bool {
        let snapshot = self.session.snapshot();
        let (Some(session_name), Some(date_prefix)) = (snapshot.session_name, snapshot.date_prefix)
        else {
            self.previous.clear();
            self.pending.clear();
            return true;
        };
        if !snapshot.active {
            self.previous.clear();
            self.pending.clear();
            return true;
        }

        let incoming_dir = ingest_storage::incoming_dir(&self.cfg, &session_name);
        let current = match scan_directory(&incoming_dir, &self.cfg.file_extensions).await {
            Ok(current) => {
                self.backoff = Duration::ZERO;
                current
            }
            Err(StorageError::Transient(err)) => {
                warn!(error = %err, dir = %incoming_dir.display(), "NFS scan: transient error, skipping cycle");
                return true;
            }
            Err(StorageError::Persistent(err)) => {
                error!(error = %err, dir = %incoming_dir.display(), "NFS scan error");
                self.backoff = if self.backoff.is_zero() {
                    MIN_BACKOFF
                } else {
                    (self.backoff * 2).min(MAX_BACKOFF)
                };
                return true;
            }
        };

        // Prune pending entries for files no longer in incoming (a worker
        // claimed them by renaming them away).
        self.pending.retain(|name| current.contains_key(name));

        let now = self.clock.now_secs();
        for (filename, (size, mtime)) in &current {
            if self.pending.contains(filename) {
                continue;
            }
            let Some((prev_size, prev_mtime)) = self.previous.get(filename) else {
                continue;
            };
            if size != prev_size || mtime != prev_mtime {
                continue;
            }
            if now - mtime < self.cfg.min_file_age.as_secs_f64() {
                continue;
            }

            let item = WorkItem {
                source_path: incoming_dir.join(filename),
                session_name: session_name.clone(),
                date_prefix: date_prefix.clone(),
                filename: filename.clone(),
                from_recovery: false,
            };
            debug!(filename, "watcher: file is stable, enqueueing");
            if self.queue.push(item).await.is_err() {
                return false;
            }
            self.pending.insert(filename.clone());
        }

        self.previous = current;
        true
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
