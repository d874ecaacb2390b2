// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration, loaded once from the environment at startup.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable runtime parameters for one process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    // Azure (required)
    pub azure_account_url: String,
    pub azure_container: String,

    // Azure (optional fallback auth)
    pub azure_connection_string: Option<String>,
    pub azure_account_name: Option<String>,
    pub azure_account_key: Option<String>,
    pub azure_max_block_size: Option<u64>,
    pub azure_max_single_put_size: Option<u64>,
    pub azure_max_concurrency: usize,

    // NFS paths
    pub nfs_incoming_dir: PathBuf,
    pub nfs_processing_root: PathBuf,
    pub local_staging_root: PathBuf,

    // Watcher tuning
    pub poll_interval: Duration,
    pub min_file_age: Duration,
    pub file_extensions: HashSet<String>,

    // Queue and workers
    pub max_queue_size: usize,
    pub worker_concurrency: usize,

    // GC
    pub gc_interval: Duration,
}

impl Config {
    /// Load configuration from the process environment, applying the
    /// defaults and validation rules in spec §6.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            azure_account_url: required("AZURE_ACCOUNT_URL")?,
            azure_container: required("AZURE_CONTAINER")?,
            azure_connection_string: optional_string("AZURE_CONNECTION_STRING"),
            azure_account_name: optional_string("AZURE_ACCOUNT_NAME"),
            azure_account_key: optional_string("AZURE_ACCOUNT_KEY"),
            azure_max_block_size: optional_parsed("AZURE_MAX_BLOCK_SIZE")?,
            azure_max_single_put_size: optional_parsed("AZURE_MAX_SINGLE_PUT_SIZE")?,
            azure_max_concurrency: parsed_or("AZURE_MAX_CONCURRENCY", 8)?,

            nfs_incoming_dir: path_or("NFS_INCOMING_DIR", "/mnt/nfs/incoming"),
            nfs_processing_root: path_or("NFS_PROCESSING_ROOT", "/mnt/nfs/.processing"),
            local_staging_root: path_or("LOCAL_STAGING_ROOT", "/mnt/staging"),

            poll_interval: secs_or("POLL_INTERVAL_S", 2.0)?,
            min_file_age: secs_or("MIN_FILE_AGE_S", 5.0)?,
            file_extensions: parse_extensions(&optional_string("FILE_EXTENSIONS").unwrap_or_default()),

            max_queue_size: parsed_or("MAX_QUEUE_SIZE", 2000)?,
            worker_concurrency: parsed_or("WORKER_CONCURRENCY", 4)?,

            gc_interval: secs_or("GC_INTERVAL_S", 30.0)?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional_string(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn optional_parsed<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match optional_string(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                value: raw,
                reason: "not a valid number".to_string(),
            }),
    }
}

fn parsed_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match optional_string(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
            reason: "not a valid number".to_string(),
        }),
    }
}

fn secs_or(name: &'static str, default: f64) -> Result<Duration, ConfigError> {
    let secs: f64 = parsed_or(name, default)?;
    if secs < 0.0 || !secs.is_finite() {
        return Err(ConfigError::Invalid {
            name,
            value: secs.to_string(),
            reason: "must be a non-negative, finite number of seconds".to_string(),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}

fn path_or(name: &'static str, default: &str) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

/// Parse a comma list like `.bin,mp4, .DAT` into `{".bin", ".mp4", ".dat"}`.
/// Empty input means "accept all extensions".
fn parse_extensions(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            if lower.starts_with('.') {
                lower
            } else {
                format!(".{lower}")
            }
        })
        .collect()
}

#[cfg(any(test, feature = "test-support"))]
impl Config {
    /// Build a `Config` rooted under `root` for tests, with Azure fields
    /// filled with placeholder values (no network calls are made by code
    /// that only exercises the filesystem layer).
    pub fn for_test(root: &std::path::Path) -> Self {
        Self {
            azure_account_url: "https://example.blob.core.windows.net".to_string(),
            azure_container: "test-container".to_string(),
            azure_connection_string: None,
            azure_account_name: None,
            azure_account_key: None,
            azure_max_block_size: None,
            azure_max_single_put_size: None,
            azure_max_concurrency: 8,

            nfs_incoming_dir: root.join("incoming"),
            nfs_processing_root: root.join("processing"),
            local_staging_root: root.join("staging"),

            poll_interval: Duration::from_millis(50),
            min_file_age: Duration::from_millis(50),
            file_extensions: HashSet::new(),

            max_queue_size: 2000,
            worker_concurrency: 4,

            gc_interval: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
