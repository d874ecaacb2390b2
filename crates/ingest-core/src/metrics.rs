// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process counters and gauges backing the observability surface.
//!
//! This is a minimal stand-in for the OTLP metrics pipeline, which is an
//! external collaborator (see spec §1). Values here are in-memory only and
//! reset on restart, matching the Open Question in spec §9 about counter
//! persistence.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Shared counters/gauges updated by the Watcher, Worker pool, and Queue.
#[derive(Debug, Default)]
pub struct Metrics {
    files_processed: AtomicU64,
    files_failed: AtomicU64,
    queue_depth: AtomicI64,
    upload_duration_count: AtomicU64,
    upload_duration_sum_micros: AtomicU64,
    file_size_count: AtomicU64,
    file_size_sum_bytes: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_files_processed(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_files_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn files_processed(&self) -> u64 {
        self.files_processed.load(Ordering::Relaxed)
    }

    pub fn files_failed(&self) -> u64 {
        self.files_failed.load(Ordering::Relaxed)
    }

    /// Increment the queue depth gauge (called on successful enqueue).
    pub fn queue_depth_inc(&self) {
        self.queue_depth.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement the queue depth gauge (called when a worker finishes an
    /// item, success or failure).
    pub fn queue_depth_dec(&self) {
        self.queue_depth.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn queue_depth(&self) -> i64 {
        self.queue_depth.load(Ordering::Relaxed)
    }

    pub fn record_upload(&self, duration: std::time::Duration, size_bytes: u64) {
        self.upload_duration_count.fetch_add(1, Ordering::Relaxed);
        self.upload_duration_sum_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.file_size_count.fetch_add(1, Ordering::Relaxed);
        self.file_size_sum_bytes.fetch_add(size_bytes, Ordering::Relaxed);
    }

    pub fn upload_duration_mean_secs(&self) -> f64 {
        let n = self.upload_duration_count.load(Ordering::Relaxed);
        if n == 0 {
            return 0.0;
        }
        let sum = self.upload_duration_sum_micros.load(Ordering::Relaxed) as f64;
        sum / n as f64 / 1_000_000.0
    }

    pub fn file_size_mean_bytes(&self) -> f64 {
        let n = self.file_size_count.load(Ordering::Relaxed);
        if n == 0 {
            return 0.0;
        }
        self.file_size_sum_bytes.load(Ordering::Relaxed) as f64 / n as f64
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
