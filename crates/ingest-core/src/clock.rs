// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for deterministic time in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Source of "now", injectable so watcher/worker stability windows can be
/// tested without real sleeps.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Seconds since the Unix epoch.
    fn now_secs(&self) -> f64;

    /// Current UTC date, formatted as `YYYYMMDD`.
    fn today_utc(&self) -> String {
        let secs = self.now_secs();
        let dt = DateTime::<Utc>::from(UNIX_EPOCH + std::time::Duration::from_secs_f64(secs));
        dt.format("%Y%m%d").to_string()
    }
}

/// Wall-clock time, used in production.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }
}

/// Controllable clock for tests: starts at an arbitrary instant and only
/// advances when told to.
#[derive(Debug, Clone)]
pub struct FakeClock {
    micros: Arc<AtomicU64>,
}

impl FakeClock {
    /// Start the clock at the given number of seconds since the epoch.
    pub fn new(start_secs: f64) -> Self {
        Self {
            micros: Arc::new(AtomicU64::new((start_secs * 1_000_000.0) as u64)),
        }
    }

    /// Advance the clock by `secs`.
    pub fn advance(&self, secs: f64) {
        let delta = (secs * 1_000_000.0) as u64;
        self.micros.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(1_700_000_000.0)
    }
}

impl Clock for FakeClock {
    fn now_secs(&self) -> f64 {
        self.micros.load(Ordering::SeqCst) as f64 / 1_000_000.0
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
