// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ingest-blob: the `BlobUploader` capability and its implementations.

pub mod azure;
pub mod error;
pub mod uploader;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use azure::AzureBlobUploader;
pub use error::BlobError;
pub use uploader::BlobUploader;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBlobUploader, UploadCall};
