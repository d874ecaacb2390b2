// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GC sweep: reclaim `.completed` markers and their staging residue, then
//! prune directories left empty behind them.
//!
//! Best-effort throughout: a single failure is logged by the caller at
//! debug level and the sweep continues. The invariant this preserves is
//! that a `.completed` marker never becomes a live `WorkItem` again;
//! Recovery already skips them, and the Watcher never looks at
//! `processing/` at all.

use std::path::{Path, PathBuf};

use ingest_core::Config;

/// One `.completed` marker found under `processing/`.
pub struct CompletedMarker {
    pub processing_root_relative: PathBuf,
    pub absolute_path: PathBuf,
}

/// Recursively collect every `*.completed` file under `processing_root`.
pub async fn find_completed_markers(processing_root: &Path) -> std::io::Result<Vec<CompletedMarker>> {
    let mut out = Vec::new();
    walk_collect(processing_root, processing_root, &mut out).await?;
    Ok(out)
}

fn walk_collect<'a>(
    root: &'a Path,
    dir: &'a Path,
    out: &'a mut Vec<CompletedMarker>,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                walk_collect(root, &path, out).await?;
            } else if file_type.is_file() {
                if path.extension().and_then(|e| e.to_str()) == Some("completed") {
                    let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                    out.push(CompletedMarker {
                        processing_root_relative: relative,
                        absolute_path: path,
                    });
                }
            }
        }
        Ok(())
    })
}

/// Reclaim one marker: unlink it, then unlink the corresponding staging
/// file as a belt-and-suspenders safety net (the Worker already deletes
/// it on the happy path).
pub async fn reclaim_marker(cfg: &Config, marker: &CompletedMarker) -> std::io::Result<()> {
    tokio::fs::remove_file(&marker.absolute_path).await?;

    if let Some(original_relative) = strip_completed_suffix(&marker.processing_root_relative) {
        let staging_path = cfg.local_staging_root.join(original_relative);
        match tokio::fs::remove_file(&staging_path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn strip_completed_suffix(relative: &Path) -> Option<PathBuf> {
    let file_name = relative.file_name()?.to_str()?;
    let original_name = file_name.strip_suffix(".completed")?;
    Some(relative.with_file_name(original_name))
}

/// Walk `root` bottom-up and `rmdir` any directory that is neither the
/// root itself nor non-empty. Errors (e.g. a directory that gained a new
/// file between listing and removal) are ignored.
pub async fn prune_empty_dirs(root: &Path) {
    let _ = prune_recursive(root, root).await;
}

fn prune_recursive<'a>(
    root: &'a Path,
    dir: &'a Path,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err),
        };

        let mut subdirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                subdirs.push(entry.path());
            }
        }
        for subdir in &subdirs {
            prune_recursive(root, subdir).await?;
        }

        if dir != root {
            // Ignore failure: non-empty (a file or a subdir survived) or a
            // race with a concurrent writer.
            let _ = tokio::fs::remove_dir(dir).await;
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "janitor_tests.rs"]
mod tests;
