// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ingest_core::Config;
use tempfile::tempdir;

#[test]
fn completed_path_appends_suffix() {
    let p = PathBuf::from("/mnt/nfs/.processing/20260305/alpha/x.bin");
    assert_eq!(
        completed_path(&p),
        PathBuf::from("/mnt/nfs/.processing/20260305/alpha/x.bin.completed")
    );
}

#[test]
fn paths_nest_date_then_session_then_filename() {
    let dir = tempdir().unwrap();
    let cfg = Config::for_test(dir.path());
    assert_eq!(
        processing_path(&cfg, "20260305", "alpha", "x.bin"),
        cfg.nfs_processing_root.join("20260305").join("alpha").join("x.bin")
    );
    assert_eq!(
        staging_path(&cfg, "20260305", "alpha", "x.bin"),
        cfg.local_staging_root.join("20260305").join("alpha").join("x.bin")
    );
}

#[tokio::test]
async fn ensure_session_dirs_creates_all_three_trees() {
    let dir = tempdir().unwrap();
    let cfg = Config::for_test(dir.path());
    ensure_session_dirs(&cfg, "20260305", "alpha").await.unwrap();

    assert!(incoming_dir(&cfg, "alpha").is_dir());
    assert!(processing_dir(&cfg, "20260305", "alpha").is_dir());
    assert!(staging_dir(&cfg, "20260305", "alpha").is_dir());
}

#[tokio::test]
async fn ensure_session_dirs_is_idempotent() {
    let dir = tempdir().unwrap();
    let cfg = Config::for_test(dir.path());
    ensure_session_dirs(&cfg, "20260305", "alpha").await.unwrap();
    ensure_session_dirs(&cfg, "20260305", "alpha").await.unwrap();
    assert!(incoming_dir(&cfg, "alpha").is_dir());
}
