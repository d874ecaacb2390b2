// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn queue_depth_tracks_enqueue_and_dequeue() {
    let m = Metrics::new();
    m.queue_depth_inc();
    m.queue_depth_inc();
    m.queue_depth_dec();
    assert_eq!(m.queue_depth(), 1);
}

#[test]
fn files_processed_and_failed_are_independent() {
    let m = Metrics::new();
    m.inc_files_processed();
    m.inc_files_processed();
    m.inc_files_failed();
    assert_eq!(m.files_processed(), 2);
    assert_eq!(m.files_failed(), 1);
}

#[test]
fn upload_mean_over_two_samples() {
    let m = Metrics::new();
    m.record_upload(Duration::from_secs(1), 100);
    m.record_upload(Duration::from_secs(3), 300);
    assert!((m.upload_duration_mean_secs() - 2.0).abs() < 1e-6);
    assert!((m.file_size_mean_bytes() - 200.0).abs() < 1e-6);
}
