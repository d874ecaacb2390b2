// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ingestd: durably moves files from an NFS-mounted `incoming/` directory
//! into a cloud blob container.
//!
//! Startup order: load configuration, set up logging, connect to blob
//! storage (auth ladder, fatal on failure), then hand off to the
//! Supervisor, which runs Recovery once before starting the Watcher,
//! Worker pool, and Janitor. Shuts down on SIGTERM/SIGINT, draining
//! in-flight and already-queued work before exiting.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use ingest_blob::AzureBlobUploader;
use ingest_core::{Config, Metrics, SessionState, SystemClock};
use ingest_engine::Supervisor;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ingestd: invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let _log_guard = setup_logging();

    info!("ingestd starting");

    let uploader = match AzureBlobUploader::connect(&config).await {
        Ok(uploader) => uploader,
        Err(err) => {
            error!(error = %err, "ingestd: could not connect to blob storage");
            std::process::exit(1);
        }
    };

    let cfg = Arc::new(config);
    let session = Arc::new(SessionState::new());
    let metrics = Arc::new(Metrics::new());
    let clock = SystemClock;

    let cancel = CancellationToken::new();

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("ingestd: received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("ingestd: received SIGINT, shutting down"),
        }
        shutdown_cancel.cancel();
    });

    let supervisor = Supervisor::new(cfg, session, Arc::new(uploader), metrics, clock);

    if let Err(err) = supervisor.run(cancel).await {
        error!(error = %err, "ingestd: supervisor exited with error");
        std::process::exit(1);
    }

    info!("ingestd stopped");
    Ok(())
}

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(non_blocking))
        .init();

    guard
}
