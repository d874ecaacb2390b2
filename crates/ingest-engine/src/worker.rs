// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The critical path: claim -> stage -> upload -> commit -> cleanup ->
//! accounting. Each `Worker` is one `tokio::task` pulling from the shared
//! queue; failures at any step are logged and counted, never retried
//! in-process; durable `processing/` state plus Recovery is the retry
//! mechanism across restarts.

use std::sync::Arc;
use std::time::Instant;

use ingest_blob::BlobUploader;
use ingest_core::{Config, Metrics, SessionState, WorkItem};
use ingest_storage::{claim, commit, completed_path, copy_with_fsync, processing_path, remove_staging_file, staging_dir, staging_path, ClaimOutcome};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::queue::QueueReceiver;

pub struct Worker {
    id: usize,
    cfg: Arc<Config>,
    session: Arc<SessionState>,
    queue: Arc<Mutex<QueueReceiver>>,
    uploader: Arc<dyn BlobUploader>,
    metrics: Arc<Metrics>,
}

impl Worker {
    pub fn new(
        id: usize,
        cfg: Arc<Config>,
        session: Arc<SessionState>,
        queue: Arc<Mutex<QueueReceiver>>,
        uploader: Arc<dyn BlobUploader>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            id,
            cfg,
            session,
            queue,
            uploader,
            metrics,
        }
    }

    /// Pull items until the queue closes or `cancel` fires with the queue
    /// empty. Items already buffered are drained before a worker stops;
    /// `pop` is listed first in the `biased` select so a buffered item
    /// always wins over an already-fired cancellation.
    pub async fn run(self, cancel: CancellationToken) {
        loop {
            let item = {
                let mut rx = self.queue.lock().await;
                tokio::select! {
                    biased;
                    item = rx.pop() => item,
                    _ = cancel.cancelled() => None,
                }
            };
            let Some(item) = item else { break };
            self.process_item(item).await;
        }
        debug!(worker_id = self.id, "worker: stopped");
    }

    async fn process_item(&self, item: WorkItem) {
        let processing_path = processing_path(&self.cfg, &item.date_prefix, &item.session_name, &item.filename);
        let staging_path = staging_path(&self.cfg, &item.date_prefix, &item.session_name, &item.filename);
        let completed_path = completed_path(&processing_path);
        let blob_name = item.blob_name();

        if !item.from_recovery {
            match claim(&item.source_path, &processing_path).await {
                Ok(ClaimOutcome::Claimed) => {}
                Ok(ClaimOutcome::AlreadyClaimed) => {
                    debug!(filename = %item.filename, "worker: file already claimed, skipping");
                    self.metrics.queue_depth_dec();
                    return;
                }
                Err(err) => {
                    error!(error = %err, filename = %item.filename, "worker: claim failed");
                    self.fail(&item, err.to_string());
                    return;
                }
            }
        }

        let item_staging_dir = staging_dir(&self.cfg, &item.date_prefix, &item.session_name);
        if let Err(err) = tokio::fs::create_dir_all(&item_staging_dir).await {
            error!(error = %err, filename = %item.filename, "worker: could not create staging dir");
            self.fail(&item, err.to_string());
            return;
        }

        if let Err(err) = copy_with_fsync(&processing_path, &staging_path).await {
            error!(error = %err, filename = %item.filename, "worker: stage copy failed");
            self.fail(&item, err.to_string());
            return;
        }

        let size_bytes = match tokio::fs::metadata(&staging_path).await {
            Ok(meta) => meta.len(),
            Err(err) => {
                error!(error = %err, filename = %item.filename, "worker: could not stat staged file");
                self.fail(&item, err.to_string());
                return;
            }
        };

        let started = Instant::now();
        if let Err(err) = self.uploader.upload(&staging_path, &blob_name).await {
            error!(error = %err, filename = %item.filename, blob_name = %blob_name, "worker: upload failed");
            self.fail(&item, err.to_string());
            return;
        }
        let duration = started.elapsed();

        if let Err(err) = commit(&processing_path, &completed_path).await {
            error!(error = %err, filename = %item.filename, "worker: commit failed");
            self.fail(&item, err.to_string());
            return;
        }

        if let Err(err) = remove_staging_file(&staging_path).await {
            warn!(error = %err, filename = %item.filename, "worker: staging cleanup failed, janitor will reclaim");
        }

        self.metrics.record_upload(duration, size_bytes);
        self.metrics.inc_files_processed();
        self.metrics.queue_depth_dec();
        self.session.record_success();
        info!(
            file_name = %item.filename,
            session_name = %item.session_name,
            date_prefix = %item.date_prefix,
            blob_name = %blob_name,
            size_bytes,
            duration_s = duration.as_secs_f64(),
            "worker: upload committed"
        );
    }

    fn fail(&self, item: &WorkItem, error: String) {
        self.metrics.inc_files_failed();
        self.metrics.queue_depth_dec();
        self.session.record_failure(format!("{}: {}", item.filename, error));
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
