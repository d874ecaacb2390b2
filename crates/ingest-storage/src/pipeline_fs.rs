// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The rename-based claim/stage/commit primitives a Worker drives.
//!
//! `claim` and `commit` rely on POSIX rename atomicity within a single
//! filesystem; callers must ensure `incoming`, `processing`, and the
//! staging root resolve to the same mount for the hops that cross between
//! `incoming` and `processing` (staging is a copy, not a rename, so it may
//! live on a different filesystem).

use std::path::Path;

use filetime::FileTime;

use crate::error::StorageError;

/// Outcome of attempting to claim a file out of `incoming/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The rename succeeded; this worker now owns the file exclusively.
    Claimed,
    /// The source was already gone (ENOENT/ESTALE); another worker (or a
    /// prior life of this process) already claimed it.
    AlreadyClaimed,
}

/// Atomically move a file from `incoming/` into `processing/`. This rename
/// is the sole mutual-exclusion mechanism across workers: at most one
/// caller observes `ClaimOutcome::Claimed` for a given source path.
pub async fn claim(source_path: &Path, processing_path: &Path) -> Result<ClaimOutcome, StorageError> {
    match tokio::fs::rename(source_path, processing_path).await {
        Ok(()) => Ok(ClaimOutcome::Claimed),
        Err(err) => match StorageError::from(err) {
            StorageError::Transient(_) => Ok(ClaimOutcome::AlreadyClaimed),
            other => Err(other),
        },
    }
}

/// Copy `src` to `dst`, preserving mtime, then fsync the destination so the
/// local staging copy is durable before upload begins.
pub async fn copy_with_fsync(src: &Path, dst: &Path) -> Result<(), StorageError> {
    let src = src.to_path_buf();
    let dst = dst.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<(), std::io::Error> {
        std::fs::copy(&src, &dst)?;

        let metadata = std::fs::metadata(&src)?;
        let mtime = FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(&dst, mtime)?;

        let file = std::fs::File::open(&dst)?;
        file.sync_all()?;
        Ok(())
    })
    .await
    .map_err(|join_err| std::io::Error::other(join_err.to_string()))??;
    Ok(())
}

/// The durable commit point: rename `processing_path` to
/// `processing_path.completed`. If the process crashes before this call,
/// Recovery will re-upload; if it crashes after, the Janitor will
/// eventually reclaim the marker.
pub async fn commit(processing_path: &Path, completed_path: &Path) -> Result<(), StorageError> {
    tokio::fs::rename(processing_path, completed_path).await?;
    Ok(())
}

/// Best-effort cleanup of the local staging copy. Failures are logged by
/// the caller, not propagated; losing the staging copy does not affect
/// correctness once the commit rename has happened.
pub async fn remove_staging_file(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
#[path = "pipeline_fs_tests.rs"]
mod tests;
