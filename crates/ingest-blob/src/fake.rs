// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake blob uploader for testing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::BlobError;
use crate::uploader::BlobUploader;

/// One recorded call to [`FakeBlobUploader::upload`], including the bytes
/// read from disk at the time of the call (so tests can assert the
/// uploaded content matches the source file at the moment of stability).
#[derive(Debug, Clone)]
pub struct UploadCall {
    pub local_path: PathBuf,
    pub blob_name: String,
    pub bytes: Vec<u8>,
}

/// In-memory `BlobUploader` that records every call and can be told to
/// fail the next N uploads, for exercising the worker's error path.
#[derive(Default)]
pub struct FakeBlobUploader {
    calls: Mutex<Vec<UploadCall>>,
    fail_next: Mutex<usize>,
}

impl FakeBlobUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` calls to `upload` with a deterministic error.
    pub fn fail_next(&self, n: usize) {
        *self.fail_next.lock() = n;
    }

    pub fn calls(&self) -> Vec<UploadCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Content uploaded for `blob_name`, if any. When overwrite occurred
    /// mid-run, this is the most recent call's bytes, matching the
    /// overwrite=true semantics of the real uploader.
    pub fn content_for(&self, blob_name: &str) -> Option<Vec<u8>> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|c| c.blob_name == blob_name)
            .map(|c| c.bytes.clone())
    }
}

#[async_trait]
impl BlobUploader for FakeBlobUploader {
    async fn upload(&self, local_path: &Path, blob_name: &str) -> Result<(), BlobError> {
        let mut remaining = self.fail_next.lock();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(BlobError::Io(std::io::Error::other("injected failure")));
        }
        drop(remaining);

        let bytes = tokio::fs::read(local_path).await?;
        self.calls.lock().push(UploadCall {
            local_path: local_path.to_path_buf(),
            blob_name: blob_name.to_string(),
            bytes,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
