// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owns one run of the pipeline: recovery, then the Watcher, Worker pool,
//! and Janitor tasks, wired to a shared `CancellationToken`.
//!
//! The Watcher and Janitor stop as soon as cancellation is observed.
//! Workers keep draining the queue until it is both empty and closed, so
//! in-flight and already-queued work finishes before the process exits.

use std::sync::Arc;

use ingest_blob::BlobUploader;
use ingest_core::{Clock, Config, Metrics, SessionState};
use ingest_storage::{ensure_session_dirs, recover};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::EngineError;
use crate::janitor;
use crate::queue;
use crate::watcher::Watcher;
use crate::worker::Worker;

pub struct Supervisor<C: Clock> {
    cfg: Arc<Config>,
    session: Arc<SessionState>,
    uploader: Arc<dyn BlobUploader>,
    metrics: Arc<Metrics>,
    clock: C,
}

impl<C: Clock> Supervisor<C> {
    pub fn new(
        cfg: Arc<Config>,
        session: Arc<SessionState>,
        uploader: Arc<dyn BlobUploader>,
        metrics: Arc<Metrics>,
        clock: C,
    ) -> Self {
        Self {
            cfg,
            session,
            uploader,
            metrics,
            clock,
        }
    }

    /// Run recovery once, then the Watcher/Worker-pool/Janitor tasks until
    /// `cancel` fires and every worker has drained. Returns once the whole
    /// pipeline has stopped.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), EngineError> {
        let recovery = recover(&self.cfg.nfs_processing_root).await?;

        if let Some((date_prefix, session_name)) = recovery.resume {
            info!(session_name = %session_name, date_prefix = %date_prefix, "supervisor: auto-resuming session from recovery scan");
            self.session.start(session_name.clone(), date_prefix.clone())?;
            ensure_session_dirs(&self.cfg, &date_prefix, &session_name).await?;
        }

        let (tx, rx) = queue::new(self.cfg.max_queue_size, self.metrics.clone());
        let recovered_count = recovery.items.len();
        for item in recovery.items {
            // The queue is sized generously relative to a recovery scan in
            // practice; if it is ever full here, backpressure is correct:
            // wait rather than drop durable work.
            if tx.push(item).await.is_err() {
                break;
            }
        }
        if recovered_count > 0 {
            info!(count = recovered_count, "supervisor: re-enqueued in-flight work from recovery scan");
        }

        let rx = Arc::new(Mutex::new(rx));
        let mut tasks = Vec::new();

        let watcher = Watcher::new(self.cfg.clone(), self.session.clone(), tx.clone(), self.clock.clone());
        tasks.push(tokio::spawn(watcher.run(cancel.clone())));

        for id in 0..self.cfg.worker_concurrency {
            let worker = Worker::new(id, self.cfg.clone(), self.session.clone(), rx.clone(), self.uploader.clone(), self.metrics.clone());
            tasks.push(tokio::spawn(worker.run(cancel.clone())));
        }

        tasks.push(tokio::spawn(janitor::run(self.cfg.clone(), cancel.clone())));

        // Dropping our own sender lets the workers observe channel closure
        // once the watcher (the only other sender) also drops its clone,
        // which happens when the watcher task exits on cancellation.
        drop(tx);

        for task in tasks {
            let _ = task.await;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
