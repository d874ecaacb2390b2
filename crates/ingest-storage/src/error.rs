// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem error taxonomy: transient (moved/stale handle) vs. persistent.

use std::io;
use thiserror::Error;

/// libc's ESTALE is not exposed as an `io::ErrorKind` variant, so we
/// classify it from the raw OS error code.
const ESTALE: i32 = libc::ESTALE;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The file moved or the NFS handle went stale between scan and
    /// operation; another worker (or a prior life of this one) likely
    /// already claimed it. Callers should skip, not fail, the item.
    #[error("transient filesystem error: {0}")]
    Transient(#[source] io::Error),

    /// Permission, disk-full, or any other I/O error that is not expected
    /// to resolve itself on retry within this process.
    #[error("persistent filesystem error: {0}")]
    Persistent(#[source] io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        if is_transient(&err) {
            StorageError::Transient(err)
        } else {
            StorageError::Persistent(err)
        }
    }
}

fn is_transient(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }
    matches!(err.raw_os_error(), Some(code) if code == ESTALE)
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
