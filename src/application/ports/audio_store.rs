use std::io;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StoragePath;

/// Storage for uploaded audio. `store` returns the public URL recorded on
/// the row (`/uploads/...` for local disk, a full S3 URL otherwise);
/// `fetch`/`delete` resolve that URL back to the owning backend.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<String, AudioStoreError>;

    async fn fetch(&self, audio_url: &str) -> Result<Vec<u8>, AudioStoreError>;

    async fn delete(&self, audio_url: &str) -> Result<(), AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
