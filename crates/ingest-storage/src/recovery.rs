// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup recovery scan: rebuild in-flight work from `processing/`.
//!
//! Runs once, synchronously, before the Watcher and Worker pool start. A
//! crashed process can leave files in `processing/` without a `.completed`
//! marker; recovery guarantees they are retried.

use std::path::PathBuf;

use ingest_core::WorkItem;

use crate::error::StorageError;

/// Result of a recovery scan.
#[derive(Debug, Default)]
pub struct RecoveryResult {
    pub items: Vec<WorkItem>,
    /// The lexicographically greatest `(date_prefix, session_name)` pair
    /// found, if any; the session the daemon should auto-resume.
    pub resume: Option<(String, String)>,
}

/// Walk `processing_root` one level at a time: date directories, then
/// session directories, then regular files. `.completed` markers are
/// skipped; they are reclaim-pending, not live work.
pub async fn recover(processing_root: &std::path::Path) -> Result<RecoveryResult, StorageError> {
    let mut items = Vec::new();

    let mut date_entries = match tokio::fs::read_dir(processing_root).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(RecoveryResult::default())
        }
        Err(err) => return Err(err.into()),
    };

    let mut date_dirs = Vec::new();
    while let Some(entry) = date_entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            date_dirs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    for date_prefix in date_dirs {
        let date_path = processing_root.join(&date_prefix);
        let mut session_entries = tokio::fs::read_dir(&date_path).await?;
        let mut session_dirs = Vec::new();
        while let Some(entry) = session_entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                session_dirs.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        for session_name in session_dirs {
            let session_path = date_path.join(&session_name);
            let mut file_entries = tokio::fs::read_dir(&session_path).await?;
            while let Some(entry) = file_entries.next_entry().await? {
                if !entry.file_type().await?.is_file() {
                    continue;
                }
                let filename = entry.file_name().to_string_lossy().into_owned();
                if filename.ends_with(".completed") {
                    continue;
                }
                items.push(WorkItem {
                    source_path: PathBuf::from(entry.path()),
                    session_name: session_name.clone(),
                    date_prefix: date_prefix.clone(),
                    filename,
                    from_recovery: true,
                });
            }
        }
    }

    let resume = items
        .iter()
        .map(|item| (item.date_prefix.clone(), item.session_name.clone()))
        .max();

    Ok(RecoveryResult { items, resume })
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
