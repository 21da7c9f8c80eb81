use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

use super::local_store::LocalAudioStore;
use super::s3_store::S3AudioStore;

/// Composite store: uploads go to S3 when it is configured, with any S3
/// error silently downgrading to local disk (logged only). Reads and
/// deletes are routed by the shape of the stored URL, so rows written
/// under either backend keep working.
pub struct FallbackAudioStore {
    s3: Option<S3AudioStore>,
    local: LocalAudioStore,
}

impl FallbackAudioStore {
    pub fn new(s3: Option<S3AudioStore>, local: LocalAudioStore) -> Self {
        Self { s3, local }
    }
}

#[async_trait]
impl AudioStore for FallbackAudioStore {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<String, AudioStoreError> {
        if let Some(s3) = &self.s3 {
            match s3.store(path, data.clone()).await {
                Ok(url) => {
                    tracing::info!(path = %path, "Audio stored in S3");
                    return Ok(url);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %path,
                        "S3 upload failed, falling back to local storage"
                    );
                }
            }
        }

        self.local.store(path, data).await
    }

    async fn fetch(&self, audio_url: &str) -> Result<Vec<u8>, AudioStoreError> {
        if S3AudioStore::is_s3_url(audio_url) {
            match &self.s3 {
                Some(s3) => s3.fetch(audio_url).await,
                None => Err(AudioStoreError::NotFound(format!(
                    "S3 not configured for {}",
                    audio_url
                ))),
            }
        } else {
            self.local.fetch(audio_url).await
        }
    }

    async fn delete(&self, audio_url: &str) -> Result<(), AudioStoreError> {
        if S3AudioStore::is_s3_url(audio_url) {
            match &self.s3 {
                Some(s3) => s3.delete(audio_url).await,
                None => Err(AudioStoreError::NotFound(format!(
                    "S3 not configured for {}",
                    audio_url
                ))),
            }
        } else {
            self.local.delete(audio_url).await
        }
    }
}
