// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ingest_core::Metrics;
use std::path::PathBuf;
use std::sync::Arc;

fn item(name: &str) -> WorkItem {
    WorkItem {
        source_path: PathBuf::from(format!("/incoming/alpha/{name}")),
        session_name: "alpha".to_string(),
        date_prefix: "20260305".to_string(),
        filename: name.to_string(),
        from_recovery: false,
    }
}

#[tokio::test]
async fn push_then_pop_preserves_fifo_order() {
    let metrics = Arc::new(Metrics::new());
    let (tx, mut rx) = new(10, metrics);

    tx.push(item("a.bin")).await.unwrap();
    tx.push(item("b.bin")).await.unwrap();

    assert_eq!(rx.pop().await.unwrap().filename, "a.bin");
    assert_eq!(rx.pop().await.unwrap().filename, "b.bin");
}

#[tokio::test]
async fn push_increments_queue_depth_gauge() {
    let metrics = Arc::new(Metrics::new());
    let (tx, _rx) = new(10, metrics.clone());

    tx.push(item("a.bin")).await.unwrap();
    tx.push(item("b.bin")).await.unwrap();

    assert_eq!(metrics.queue_depth(), 2);
}

#[tokio::test]
async fn pop_on_empty_queue_after_sender_dropped_returns_none() {
    let metrics = Arc::new(Metrics::new());
    let (tx, mut rx) = new(10, metrics);
    drop(tx);
    assert!(rx.pop().await.is_none());
}

#[tokio::test]
async fn push_blocks_when_queue_is_full() {
    let metrics = Arc::new(Metrics::new());
    let (tx, mut rx) = new(1, metrics);

    tx.push(item("a.bin")).await.unwrap();

    let tx2 = tx.clone();
    let blocked = tokio::spawn(async move { tx2.push(item("b.bin")).await });

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(!blocked.is_finished());

    rx.pop().await.unwrap();
    blocked.await.unwrap().unwrap();
}
