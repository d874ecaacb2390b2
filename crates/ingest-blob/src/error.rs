// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors from the blob storage boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("no viable Azure credentials configured")]
    NoCredentials,
    #[error("authentication failed: {0}")]
    AuthFailed(String),
    #[error("container '{container}' does not exist and could not be created: {source}")]
    ContainerUnavailable {
        container: String,
        #[source]
        source: azure_core::Error,
    },
    #[error("upload of '{blob_name}' failed: {source}")]
    UploadFailed {
        blob_name: String,
        #[source]
        source: azure_core::Error,
    },
    #[error("chunked upload of '{blob_name}' failed: {reason}")]
    ChunkUploadFailed { blob_name: String, reason: String },
    #[error("local file error: {0}")]
    Io(#[from] std::io::Error),
}
