// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::time::Duration;

fn clear_all() {
    for name in [
        "AZURE_ACCOUNT_URL",
        "AZURE_CONTAINER",
        "AZURE_CONNECTION_STRING",
        "AZURE_ACCOUNT_NAME",
        "AZURE_ACCOUNT_KEY",
        "AZURE_MAX_BLOCK_SIZE",
        "AZURE_MAX_SINGLE_PUT_SIZE",
        "AZURE_MAX_CONCURRENCY",
        "NFS_INCOMING_DIR",
        "NFS_PROCESSING_ROOT",
        "LOCAL_STAGING_ROOT",
        "POLL_INTERVAL_S",
        "MIN_FILE_AGE_S",
        "FILE_EXTENSIONS",
        "MAX_QUEUE_SIZE",
        "WORKER_CONCURRENCY",
        "GC_INTERVAL_S",
    ] {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn missing_required_var_fails() {
    clear_all();
    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Missing("AZURE_ACCOUNT_URL")));
}

#[test]
#[serial]
fn defaults_match_spec() {
    clear_all();
    env::set_var("AZURE_ACCOUNT_URL", "https://example.blob.core.windows.net");
    env::set_var("AZURE_CONTAINER", "recordings");

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.nfs_incoming_dir, PathBuf::from("/mnt/nfs/incoming"));
    assert_eq!(cfg.nfs_processing_root, PathBuf::from("/mnt/nfs/.processing"));
    assert_eq!(cfg.local_staging_root, PathBuf::from("/mnt/staging"));
    assert_eq!(cfg.poll_interval, Duration::from_secs_f64(2.0));
    assert_eq!(cfg.min_file_age, Duration::from_secs_f64(5.0));
    assert!(cfg.file_extensions.is_empty());
    assert_eq!(cfg.max_queue_size, 2000);
    assert_eq!(cfg.worker_concurrency, 4);
    assert_eq!(cfg.azure_max_concurrency, 8);
    assert_eq!(cfg.gc_interval, Duration::from_secs_f64(30.0));
    clear_all();
}

#[test]
#[serial]
fn invalid_numeric_value_fails() {
    clear_all();
    env::set_var("AZURE_ACCOUNT_URL", "https://example.blob.core.windows.net");
    env::set_var("AZURE_CONTAINER", "recordings");
    env::set_var("WORKER_CONCURRENCY", "not-a-number");

    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "WORKER_CONCURRENCY", .. }));
    clear_all();
}

#[test]
fn parse_extensions_lowercases_and_dot_prefixes() {
    let set = parse_extensions(" .BIN, mp4,.Dat ");
    assert!(set.contains(".bin"));
    assert!(set.contains(".mp4"));
    assert!(set.contains(".dat"));
    assert_eq!(set.len(), 3);
}

#[test]
fn parse_extensions_empty_means_accept_all() {
    assert!(parse_extensions("").is_empty());
}
