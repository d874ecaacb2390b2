// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded FIFO of `WorkItem`s shared between Watcher/Recovery (producers)
//! and the Worker pool (consumers).

use std::sync::Arc;

use ingest_core::{Metrics, WorkItem};
use tokio::sync::mpsc;

/// The producing half. Cloneable; the Watcher and Recovery both hold one.
#[derive(Clone)]
pub struct QueueSender {
    tx: mpsc::Sender<WorkItem>,
    metrics: Arc<Metrics>,
}

impl QueueSender {
    /// Enqueue an item, suspending if the queue is at capacity
    /// (backpressure to the Watcher, which is itself bounded by how fast
    /// the filesystem produces stable files).
    ///
    /// Increments the `queue.depth` gauge on success. Returns an error
    /// only if every receiver has been dropped (the queue is shutting
    /// down).
    pub async fn push(&self, item: WorkItem) -> Result<(), mpsc::error::SendError<WorkItem>> {
        self.tx.send(item).await?;
        self.metrics.queue_depth_inc();
        Ok(())
    }
}

/// The consuming half. Not cloneable directly; wrap in a shared mutex or
/// give each worker its own receiver via [`new`]'s multi-consumer variant
/// if fan-out across receivers is needed; here all workers share one
/// `Queue` behind an `Arc<tokio::sync::Mutex<_>>` at the call site.
pub struct QueueReceiver {
    rx: mpsc::Receiver<WorkItem>,
}

impl QueueReceiver {
    pub async fn pop(&mut self) -> Option<WorkItem> {
        self.rx.recv().await
    }

    /// Non-blocking pop, used by tests that need to assert "nothing
    /// enqueued yet" without racing a real sleep.
    pub fn try_pop(&mut self) -> Result<WorkItem, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }
}

/// Create a bounded queue of the given capacity.
pub fn new(capacity: usize, metrics: Arc<Metrics>) -> (QueueSender, QueueReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (QueueSender { tx, metrics }, QueueReceiver { rx })
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
