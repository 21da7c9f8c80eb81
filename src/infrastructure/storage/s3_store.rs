use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

pub struct S3AudioStore {
    inner: AmazonS3,
    bucket: String,
    region: String,
}

impl S3AudioStore {
    pub fn new(
        bucket: &str,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<Self, AudioStoreError> {
        let inner = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key)
            .build()
            .map_err(|e| AudioStoreError::UploadFailed(e.to_string()))?;

        Ok(Self {
            inner,
            bucket: bucket.to_string(),
            region: region.to_string(),
        })
    }

    /// True when a stored `audio_url` points at S3 rather than local disk.
    pub fn is_s3_url(audio_url: &str) -> bool {
        audio_url.contains(".amazonaws.com/")
    }

    fn key_from_url(audio_url: &str) -> &str {
        audio_url
            .split_once(".amazonaws.com/")
            .map(|(_, key)| key)
            .unwrap_or(audio_url)
    }
}

#[async_trait]
impl AudioStore for S3AudioStore {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<String, AudioStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| AudioStoreError::UploadFailed(e.to_string()))?;

        Ok(format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, path
        ))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_urls_are_recognized() {
        assert!(S3AudioStore::is_s3_url(
            "https://clinic.s3.eu-north-1.amazonaws.com/abc.m4a"
        ));
        assert!(!S3AudioStore::is_s3_url("/uploads/abc.m4a"));
    }

    #[test]
    fn key_is_extracted_from_url() {
        assert_eq!(
            S3AudioStore::key_from_url("https://clinic.s3.eu-north-1.amazonaws.com/abc.m4a"),
            "abc.m4a"
        );
    }
}
