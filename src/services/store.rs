use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

// Storage backend for thumbnail artifacts, keyed by cache key. Keeping the
// backend behind a trait lets the serving layer and the cache manager run
// against an in-memory store in tests.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    async fn has(&self, key: &str) -> bool;
    async fn get(&self, key: &str) -> Option<Vec<u8>>;
    async fn put(&self, key: &str, bytes: &[u8]) -> std::io::Result<()>;
}

pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ThumbnailStore for DiskStore {
    async fn has(&self, key: &str) -> bool {
        fs::metadata(self.path_for(key)).await.is_ok()
    }

    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(key)).await.ok()
    }

    // Write to a sibling temp path and rename into place, so a concurrent
    // reader never observes a truncated image.
    async fn put(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        let tmp_path = self.root.join(format!("{key}.tmp"));
        fs::write(&tmp_path, bytes).await?;
        fs::rename(&tmp_path, self.path_for(key)).await
    }
}

#[cfg(test)]
pub struct MemoryStore {
    entries: tokio::sync::RwLock<std::collections::HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: tokio::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ThumbnailStore for MemoryStore {
    async fn has(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disk_store_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());

        assert!(!store.has("clip.mp4.jpg").await);
        assert_eq!(store.get("clip.mp4.jpg").await, None);

        store.put("clip.mp4.jpg", b"jpeg bytes").await.unwrap();

        assert!(store.has("clip.mp4.jpg").await);
        assert_eq!(store.get("clip.mp4.jpg").await.unwrap(), b"jpeg bytes");
        assert!(dir.path().join("clip.mp4.jpg").is_file());
    }

    #[tokio::test]
    async fn disk_store_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());

        store.put("clip.mp4.jpg", b"jpeg bytes").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["clip.mp4.jpg"]);
    }

    #[tokio::test]
    async fn put_overwrites_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());

        store.put("clip.mp4.jpg", b"first").await.unwrap();
        store.put("clip.mp4.jpg", b"second").await.unwrap();

        assert_eq!(store.get("clip.mp4.jpg").await.unwrap(), b"second");
    }
}
