// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ingest_storage::{completed_path, processing_path, staging_path};
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn sweep_reclaims_completed_marker_and_its_staging_residue() {
    let dir = tempdir().unwrap();
    let cfg = Config::for_test(dir.path());

    let processing = processing_path(&cfg, "20260305", "alpha", "clip.bin");
    fs::create_dir_all(processing.parent().unwrap()).unwrap();
    let marker = completed_path(&processing);
    fs::write(&marker, b"").unwrap();

    let staging = staging_path(&cfg, "20260305", "alpha", "clip.bin");
    fs::create_dir_all(staging.parent().unwrap()).unwrap();
    fs::write(&staging, b"leftover").unwrap();

    sweep(&cfg).await;

    assert!(!marker.exists());
    assert!(!staging.exists());
    // the now-empty session/date directories under processing/ get pruned too
    assert!(!processing.parent().unwrap().exists());
}

#[tokio::test]
async fn sweep_on_missing_processing_root_does_not_panic() {
    let dir = tempdir().unwrap();
    let cfg = Config::for_test(dir.path());
    sweep(&cfg).await;
}
