// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path layout for the four filesystem roots in the pipeline, and the
//! idempotent directory creation a session start requires.

use std::path::{Path, PathBuf};

use ingest_core::Config;

use crate::error::StorageError;

pub fn incoming_dir(cfg: &Config, session_name: &str) -> PathBuf {
    cfg.nfs_incoming_dir.join(session_name)
}

pub fn processing_dir(cfg: &Config, date_prefix: &str, session_name: &str) -> PathBuf {
    cfg.nfs_processing_root.join(date_prefix).join(session_name)
}

pub fn processing_path(cfg: &Config, date_prefix: &str, session_name: &str, filename: &str) -> PathBuf {
    processing_dir(cfg, date_prefix, session_name).join(filename)
}

pub fn completed_path(processing_path: &Path) -> PathBuf {
    let mut name = processing_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".completed");
    processing_path.with_file_name(name)
}

pub fn staging_dir(cfg: &Config, date_prefix: &str, session_name: &str) -> PathBuf {
    cfg.local_staging_root.join(date_prefix).join(session_name)
}

pub fn staging_path(cfg: &Config, date_prefix: &str, session_name: &str, filename: &str) -> PathBuf {
    staging_dir(cfg, date_prefix, session_name).join(filename)
}

/// Create the incoming/processing/staging directory trees for a newly
/// started session. Idempotent: safe to call on an already-existing tree.
pub async fn ensure_session_dirs(
    cfg: &Config,
    date_prefix: &str,
    session_name: &str,
) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(incoming_dir(cfg, session_name)).await?;
    tokio::fs::create_dir_all(processing_dir(cfg, date_prefix, session_name)).await?;
    tokio::fs::create_dir_all(staging_dir(cfg, date_prefix, session_name)).await?;
    Ok(())
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
