use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::presentation::config::StorageSettings;

use super::fallback_store::FallbackAudioStore;
use super::local_store::LocalAudioStore;
use super::s3_store::S3AudioStore;

pub struct AudioStoreFactory;

impl AudioStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn AudioStore>, AudioStoreError> {
        let local = LocalAudioStore::new(PathBuf::from(&settings.local_path))?;

        let s3 = match &settings.s3 {
            Some(s3_settings) => {
                tracing::info!(bucket = %s3_settings.bucket, "S3 audio storage enabled");
                Some(S3AudioStore::new(
                    &s3_settings.bucket,
                    &s3_settings.region,
                    &s3_settings.access_key_id,
                    &s3_settings.secret_access_key,
                )?)
            }
            None => {
                tracing::info!(path = %settings.local_path, "Using local audio storage only");
                None
            }
        };

        Ok(Arc::new(FallbackAudioStore::new(s3, local)))
    }
}
