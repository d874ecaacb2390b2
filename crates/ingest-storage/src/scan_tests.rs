// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;
use tempfile::tempdir;

#[tokio::test]
async fn missing_directory_scans_as_empty() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let map = scan_directory(&missing, &HashSet::new()).await.unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn empty_directory_scans_as_empty() {
    let dir = tempdir().unwrap();
    let map = scan_directory(dir.path(), &HashSet::new()).await.unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn finds_regular_files_with_size_and_mtime() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.bin"), b"hello").unwrap();

    let map = scan_directory(dir.path(), &HashSet::new()).await.unwrap();
    let (size, mtime) = map.get("a.bin").unwrap();
    assert_eq!(*size, 5);
    assert!(*mtime > 0.0);
}

#[tokio::test]
async fn skips_subdirectories() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("subdir")).unwrap();

    let map = scan_directory(dir.path(), &HashSet::new()).await.unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn extension_filter_is_case_insensitive() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.BIN"), b"x").unwrap();
    std::fs::write(dir.path().join("b.log"), b"x").unwrap();

    let mut allowed = HashSet::new();
    allowed.insert(".bin".to_string());

    let map = scan_directory(dir.path(), &allowed).await.unwrap();
    assert!(map.contains_key("a.BIN"));
    assert!(!map.contains_key("b.log"));
}

#[tokio::test]
async fn empty_extension_filter_accepts_everything() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.bin"), b"x").unwrap();
    std::fs::write(dir.path().join("b.log"), b"x").unwrap();

    let map = scan_directory(dir.path(), &HashSet::new()).await.unwrap();
    assert_eq!(map.len(), 2);
}
