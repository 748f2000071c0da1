use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::services::error::ThumbnailError;
use crate::services::extractor::FrameExtractor;
use crate::services::store::ThumbnailStore;

pub fn cache_key(filename: &str) -> String {
    format!("{filename}.jpg")
}

// Lazy thumbnail cache. A video's thumbnail is generated the first time a
// catalog pass references it and kept until removed by hand; a replaced
// source video does not refresh its thumbnail.
pub struct ThumbnailCache {
    store: Arc<dyn ThumbnailStore>,
    extractor: Arc<dyn FrameExtractor>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ThumbnailCache {
    pub fn new(store: Arc<dyn ThumbnailStore>, extractor: Arc<dyn FrameExtractor>) -> Self {
        Self {
            store,
            extractor,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.store.get(&cache_key(filename)).await
    }

    // Returns the cache key for the video's thumbnail, generating the
    // artifact on a miss. On a hit no extraction or write happens. On
    // failure nothing is stored, so the next catalog pass retries.
    pub async fn ensure_thumbnail(
        &self,
        video_path: &Path,
        filename: &str,
    ) -> Result<String, ThumbnailError> {
        let key = cache_key(filename);

        if self.store.has(&key).await {
            return Ok(key);
        }

        // Concurrent misses for the same key extract once; later requesters
        // wait here and find the artifact on the re-check.
        let guard = self.key_lock(&key).await;
        let _held = guard.lock().await;

        if self.store.has(&key).await {
            self.release_key(&key).await;
            return Ok(key);
        }

        let result = self.generate(video_path, &key).await;
        self.release_key(&key).await;
        result?;

        Ok(key)
    }

    async fn generate(&self, video_path: &Path, key: &str) -> Result<(), ThumbnailError> {
        info!("Generating thumbnail for {}", video_path.display());

        let bytes = self.extractor.extract_representative_frame(video_path).await?;
        self.store
            .put(key, &bytes)
            .await
            .map_err(ThumbnailError::CacheWrite)
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.entry(key.to_string()).or_default().clone()
    }

    async fn release_key(&self, key: &str) {
        self.in_flight.lock().await.remove(key);
    }
}
