// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic wrapper around the storage layer's GC sweep: reclaim
//! `.completed` markers and prune directories left empty behind them.

use std::sync::Arc;

use ingest_core::Config;
use ingest_storage::{find_completed_markers, prune_empty_dirs, reclaim_marker};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Run one sweep immediately, logging and continuing past any single
/// marker's reclaim failure; the next sweep will retry it.
pub async fn sweep(cfg: &Config) {
    match find_completed_markers(&cfg.nfs_processing_root).await {
        Ok(markers) => {
            for marker in &markers {
                if let Err(err) = reclaim_marker(cfg, marker).await {
                    debug!(
                        error = %err,
                        marker = %marker.processing_root_relative.display(),
                        "janitor: reclaim failed, will retry next sweep"
                    );
                }
            }
        }
        Err(err) => {
            warn!(error = %err, "janitor: could not list completed markers");
            return;
        }
    }
    prune_empty_dirs(&cfg.nfs_processing_root).await;
}

/// Sweep every `gc_interval` until `cancel` fires.
pub async fn run(cfg: Arc<Config>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(cfg.gc_interval) => {}
        }
        sweep(&cfg).await;
    }
}

#[cfg(test)]
#[path = "janitor_tests.rs"]
mod tests;
