// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

async fn touch(path: &std::path::Path) {
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(path, b"x").await.unwrap();
}

#[tokio::test]
async fn missing_processing_root_is_a_no_op() {
    let dir = tempdir().unwrap();
    let result = recover(&dir.path().join("processing")).await.unwrap();
    assert!(result.items.is_empty());
    assert!(result.resume.is_none());
}

#[tokio::test]
async fn only_completed_markers_present_is_a_no_op() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("processing");
    touch(&root.join("20260305").join("alpha").join("x.bin.completed")).await;

    let result = recover(&root).await.unwrap();
    assert!(result.items.is_empty());
    assert!(result.resume.is_none());
}

#[tokio::test]
async fn finds_uncommitted_files_as_recovery_items() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("processing");
    touch(&root.join("20260305").join("alpha").join("x.bin")).await;
    touch(&root.join("20260305").join("alpha").join("y.bin.completed")).await;

    let result = recover(&root).await.unwrap();
    assert_eq!(result.items.len(), 1);
    let item = &result.items[0];
    assert_eq!(item.filename, "x.bin");
    assert_eq!(item.session_name, "alpha");
    assert_eq!(item.date_prefix, "20260305");
    assert!(item.from_recovery);
}

#[tokio::test]
async fn resumes_lexicographically_greatest_date_session_pair() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("processing");
    touch(&root.join("20260301").join("alpha").join("a.bin")).await;
    touch(&root.join("20260305").join("zeta").join("b.bin")).await;
    touch(&root.join("20260305").join("beta").join("c.bin")).await;

    let result = recover(&root).await.unwrap();
    assert_eq!(result.items.len(), 3);
    assert_eq!(
        result.resume,
        Some(("20260305".to_string(), "zeta".to_string()))
    );
}
