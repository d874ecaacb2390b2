// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `BlobUploader` capability: the only contract the pipeline's core
//! needs from the cloud SDK. Treated as an opaque collaborator; the
//! concrete Azure implementation lives in [`crate::azure`].

use std::path::Path;

use async_trait::async_trait;

use crate::error::BlobError;

/// Upload one local file to a named blob as a block blob.
///
/// `upload` must be idempotent under overwrite for a given `blob_name`:
/// uploading the same path twice leaves the blob in the same final state,
/// which is what lets Recovery safely re-upload a file left in
/// `processing/` without a `.completed` marker after a crash.
#[async_trait]
pub trait BlobUploader: Send + Sync + 'static {
    async fn upload(&self, local_path: &Path, blob_name: &str) -> Result<(), BlobError>;
}
