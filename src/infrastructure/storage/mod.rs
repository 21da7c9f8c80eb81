mod fallback_store;
mod local_store;
mod s3_store;
mod store_factory;

pub use fallback_store::FallbackAudioStore;
pub use local_store::{LocalAudioStore, UPLOADS_PREFIX};
pub use s3_store::S3AudioStore;
pub use store_factory::AudioStoreFactory;
