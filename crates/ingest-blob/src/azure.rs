// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Azure Blob Storage implementation of [`BlobUploader`].
//!
//! Auth negotiation happens once, at [`AzureBlobUploader::connect`], and is
//! never re-entered: try default/managed-identity credential against
//! `get_properties`; on auth failure fall back to connection string, then
//! account name + key; if the container is simply missing, create it.
//! Once a client is chosen, steady state is just "upload, idempotent under
//! overwrite"; runtime upload errors never re-enter the auth ladder.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use azure_identity::DefaultAzureCredential;
use azure_storage::StorageCredentials;
use azure_storage_blobs::blob::{BlobBlockType, BlockList};
use azure_storage_blobs::prelude::{BlobClient, BlockId, ClientBuilder, ContainerClient};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use ingest_core::Config;

use crate::error::BlobError;
use crate::uploader::BlobUploader;

/// Azure's own default for the block-blob single-PUT ceiling; files at or
/// under this size skip block staging entirely.
const DEFAULT_MAX_SINGLE_PUT_SIZE: u64 = 256 * 1024 * 1024;
/// Default block size used when `azure_max_block_size` is unset.
const DEFAULT_MAX_BLOCK_SIZE: u64 = 4 * 1024 * 1024;

pub struct AzureBlobUploader {
    container_client: ContainerClient,
    max_concurrency: usize,
    max_block_size: u64,
    max_single_put_size: u64,
}

impl AzureBlobUploader {
    /// Run the one-shot auth ladder described in spec §6 and validate (or
    /// create) the target container. Any unresolved failure here is fatal
    /// to daemon startup.
    pub async fn connect(cfg: &Config) -> Result<Self, BlobError> {
        let account = account_name_from_url(&cfg.azure_account_url);

        if let Ok(container_client) = try_default_credential(&cfg.azure_account_url, &cfg.azure_container).await {
            info!(container = %cfg.azure_container, "Azure container validated with default credential");
            return Ok(Self {
                container_client,
                max_concurrency: cfg.azure_max_concurrency,
                max_block_size: cfg.azure_max_block_size.unwrap_or(DEFAULT_MAX_BLOCK_SIZE),
                max_single_put_size: cfg.azure_max_single_put_size.unwrap_or(DEFAULT_MAX_SINGLE_PUT_SIZE),
            });
        }
        warn!("default Azure credential failed, attempting fallback auth");

        let container_client = try_fallback(cfg, account.as_deref()).await?;
        Ok(Self {
            container_client,
            max_concurrency: cfg.azure_max_concurrency,
            max_block_size: cfg.azure_max_block_size.unwrap_or(DEFAULT_MAX_BLOCK_SIZE),
            max_single_put_size: cfg.azure_max_single_put_size.unwrap_or(DEFAULT_MAX_SINGLE_PUT_SIZE),
        })
    }

    fn blob_client(&self, blob_name: &str) -> BlobClient {
        self.container_client.blob_client(blob_name)
    }

    /// Stage `local_path` as committed blocks, bounded to `max_concurrency`
    /// blocks in flight at once, then commit the block list. Used once a
    /// file exceeds `max_single_put_size`.
    async fn upload_staged(&self, local_path: &Path, blob_name: &str, size: u64) -> Result<(), BlobError> {
        let block_size = self.max_block_size.max(1);
        let block_count = ((size + block_size - 1) / block_size) as usize;
        let block_ids: Vec<BlockId> = (0..block_count).map(|i| BlockId::new(format!("{i:010}"))).collect();

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, block_id) in block_ids.iter().cloned().enumerate() {
            let offset = index as u64 * block_size;
            let len = block_size.min(size - offset);
            let path = local_path.to_path_buf();
            let blob_client = self.blob_client(blob_name);
            let blob_name = blob_name.to_string();
            let permit = semaphore.clone().acquire_owned().await.map_err(|err| BlobError::ChunkUploadFailed {
                blob_name: blob_name.clone(),
                reason: err.to_string(),
            })?;

            tasks.spawn(async move {
                let _permit = permit;
                let data = read_chunk(&path, offset, len).await?;
                blob_client
                    .put_block(block_id, data)
                    .await
                    .map(|_| ())
                    .map_err(|source| BlobError::UploadFailed { blob_name, source })
            });
        }

        while let Some(result) = tasks.join_next().await {
            result
                .map_err(|err| BlobError::ChunkUploadFailed {
                    blob_name: blob_name.to_string(),
                    reason: err.to_string(),
                })??;
        }

        let mut block_list = BlockList::default();
        for block_id in block_ids {
            block_list.blocks.push(BlobBlockType::Uncommitted(block_id));
        }

        self.blob_client(blob_name)
            .put_block_list(block_list)
            .await
            .map(|_| ())
            .map_err(|source| BlobError::UploadFailed {
                blob_name: blob_name.to_string(),
                source,
            })
    }
}

async fn read_chunk(path: &Path, offset: u64, len: u64) -> Result<Vec<u8>, BlobError> {
    let mut file = tokio::fs::File::open(path).await?;
    file.seek(std::io::SeekFrom::Start(offset)).await?;
    let mut buf = vec![0u8; len as usize];
    file.read_exact(&mut buf).await?;
    Ok(buf)
}

async fn try_default_credential(account_url: &str, container: &str) -> Result<ContainerClient, BlobError> {
    let account = account_name_from_url(account_url).ok_or(BlobError::NoCredentials)?;
    let credential = DefaultAzureCredential::create(Default::default())
        .map_err(|err| BlobError::AuthFailed(err.to_string()))?;
    let credentials = StorageCredentials::token_credential(Arc::new(credential));
    let service_client = ClientBuilder::new(account, credentials).blob_service_client();
    let container_client = service_client.container_client(container);

    ensure_container(&container_client, container).await?;
    Ok(container_client)
}

async fn try_fallback(cfg: &Config, account: Option<&str>) -> Result<ContainerClient, BlobError> {
    let service_client = if let Some(conn_str) = &cfg.azure_connection_string {
        let parsed =
            azure_storage::ConnectionString::new(conn_str).map_err(|err| BlobError::AuthFailed(err.to_string()))?;
        let account = parsed
            .account_name
            .ok_or_else(|| BlobError::AuthFailed("connection string missing AccountName".to_string()))?
            .to_string();
        let credentials = parsed
            .storage_credentials()
            .map_err(|err| BlobError::AuthFailed(err.to_string()))?;
        ClientBuilder::new(account, credentials).blob_service_client()
    } else if let (Some(name), Some(key)) = (&cfg.azure_account_name, &cfg.azure_account_key) {
        let credentials = StorageCredentials::access_key(name.clone(), key.clone());
        ClientBuilder::new(name.clone(), credentials).blob_service_client()
    } else {
        let _ = account;
        return Err(BlobError::NoCredentials);
    };

    let container_client = service_client.container_client(&cfg.azure_container);
    ensure_container(&container_client, &cfg.azure_container).await?;
    info!("Azure client initialized with fallback credentials");
    Ok(container_client)
}

async fn ensure_container(container_client: &ContainerClient, name: &str) -> Result<(), BlobError> {
    match container_client.get_properties().await {
        Ok(_) => Ok(()),
        Err(_) => container_client
            .create()
            .await
            .map(|_| ())
            .map_err(|source| BlobError::ContainerUnavailable {
                container: name.to_string(),
                source,
            }),
    }
}

fn account_name_from_url(account_url: &str) -> Option<String> {
    let without_scheme = account_url.split("://").nth(1).unwrap_or(account_url);
    without_scheme.split('.').next().map(str::to_string)
}

#[async_trait]
impl BlobUploader for AzureBlobUploader {
    async fn upload(&self, local_path: &Path, blob_name: &str) -> Result<(), BlobError> {
        let size = tokio::fs::metadata(local_path).await?.len();

        if size <= self.max_single_put_size {
            let data = tokio::fs::read(local_path).await?;
            return self
                .blob_client(blob_name)
                .put_block_blob(data)
                .await
                .map(|_| ())
                .map_err(|source| BlobError::UploadFailed {
                    blob_name: blob_name.to_string(),
                    source,
                });
        }

        self.upload_staged(local_path, blob_name, size).await
    }
}
