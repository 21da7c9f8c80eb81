use bytes::Bytes;

use mediassist::application::ports::{AudioStore, AudioStoreError};
use mediassist::domain::StoragePath;
use mediassist::infrastructure::storage::LocalAudioStore;

fn store_in_tempdir() -> (tempfile::TempDir, LocalAudioStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalAudioStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_stored_audio_when_fetched_then_bytes_match() {
    let (_dir, store) = store_in_tempdir();
    let path = StoragePath::for_upload("consult.mp3");

    let url = store
        .store(&path, Bytes::from_static(b"audio payload"))
        .await
        .unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".mp3"));

    let fetched = store.fetch(&url).await.unwrap();
    assert_eq!(fetched, b"audio payload");
}

#[tokio::test]
async fn given_deleted_audio_when_fetched_then_not_found() {
    let (_dir, store) = store_in_tempdir();
    let path = StoragePath::for_upload("consult.wav");

    let url = store
        .store(&path, Bytes::from_static(b"audio payload"))
        .await
        .unwrap();
    store.delete(&url).await.unwrap();

    let result = store.fetch(&url).await;
    assert!(matches!(result, Err(AudioStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_unknown_url_when_fetched_then_not_found() {
    let (_dir, store) = store_in_tempdir();

    let result = store.fetch("/uploads/never-stored.mp3").await;
    assert!(matches!(result, Err(AudioStoreError::NotFound(_))));
}
