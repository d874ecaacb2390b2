// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Non-recursive directory scanning used by the Watcher's stability check.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::StorageError;

/// `(size_bytes, mtime_secs)` for one file, as observed in a single scan.
pub type FileStat = (u64, f64);

/// `filename -> (size, mtime)` for every regular, non-symlink file in a
/// directory, optionally filtered by extension.
pub type ScanMap = HashMap<String, FileStat>;

/// Scan `dir` non-recursively, skipping symlinks and directories.
///
/// A missing directory yields an empty map rather than an error; the
/// caller (the Watcher) treats that as "no work yet", not a scan failure.
pub async fn scan_directory(
    dir: &Path,
    allowed_extensions: &HashSet<String>,
) -> Result<ScanMap, StorageError> {
    let mut result = ScanMap::new();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(result),
        Err(err) => return Err(err.into()),
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(err) => return Err(err.into()),
        };

        let file_type = match entry.file_type().await {
            Ok(ft) => ft,
            Err(err) if is_gone(&err) => continue,
            Err(err) => return Err(err.into()),
        };
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !allowed_extensions.is_empty() && !matches_extension(&name, allowed_extensions) {
            continue;
        }

        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(err) if is_gone(&err) => continue,
            Err(err) => return Err(err.into()),
        };

        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        result.insert(name, (metadata.len(), mtime));
    }

    Ok(result)
}

fn is_gone(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::NotFound
}

fn matches_extension(filename: &str, allowed: &HashSet<String>) -> bool {
    match filename.rfind('.') {
        Some(idx) => allowed.contains(&filename[idx..].to_ascii_lowercase()),
        None => false,
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
