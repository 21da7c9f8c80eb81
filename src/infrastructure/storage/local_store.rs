use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

/// Base of the public URL under which locally stored audio is served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&base_path).map_err(AudioStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| AudioStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }

    fn key_from_url(audio_url: &str) -> &str {
        audio_url.strip_prefix(UPLOADS_PREFIX).unwrap_or(audio_url)
    }
}

#[async_trait]
impl AudioStore for LocalAudioStore {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<String, AudioStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| AudioStoreError::UploadFailed(e.to_string()))?;

        Ok(format!("{}{}", UPLOADS_PREFIX, path))
    }

    async fn fetch(&self, audio_url: &str) -> Result<Vec<u8>, AudioStoreError> {
        let store_path = StorePath::from(Self::key_from_url(audio_url));
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| AudioStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| AudioStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, audio_url: &str) -> Result<(), AudioStoreError> {
        let store_path = StorePath::from(Self::key_from_url(audio_url));
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| AudioStoreError::DeleteFailed(e.to_string()))
    }
}
