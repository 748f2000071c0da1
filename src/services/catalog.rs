use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

use crate::config::settings::Config;
use crate::services::scanner::Scanner;
use crate::services::thumbnails::ThumbnailCache;
use crate::web::models::VideoDescriptor;

// Assembles the category listing served by /api/categories. The catalog is
// recomputed from the filesystem on every build; only thumbnails persist.
pub struct Catalog {
    scanner: Scanner,
    thumbnails: Arc<ThumbnailCache>,
    base_url: String,
}

impl Catalog {
    pub fn new(config: &Config, thumbnails: Arc<ThumbnailCache>) -> Self {
        Self {
            scanner: Scanner::new(config.media_path()),
            thumbnails,
            base_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn thumbnails(&self) -> &ThumbnailCache {
        self.thumbnails.as_ref()
    }

    pub async fn find_video(&self, filename: &str) -> Result<Option<PathBuf>> {
        self.scanner
            .find_video(filename)
            .await
            .context("failed to search media folders")
    }

    pub async fn build(&self) -> Result<HashMap<String, Vec<VideoDescriptor>>> {
        let mut catalog = HashMap::new();

        for (category, folder) in self
            .scanner
            .list_categories()
            .await
            .context("failed to list media folders")?
        {
            let videos = self
                .scanner
                .list_videos(&folder, &category)
                .await
                .with_context(|| format!("failed to list videos in {category}"))?;

            let mut descriptors = Vec::with_capacity(videos.len());
            for video in videos {
                // A failed generation still lists the video; its thumbnail
                // URL will 404 until a later pass succeeds.
                if let Err(e) = self
                    .thumbnails
                    .ensure_thumbnail(&video.path, &video.filename)
                    .await
                {
                    error!("Failed to generate thumbnail for {}: {}", video.filename, e);
                }

                descriptors.push(self.describe(&video.filename));
            }

            catalog.insert(category, descriptors);
        }

        Ok(catalog)
    }

    fn describe(&self, filename: &str) -> VideoDescriptor {
        let encoded = urlencoding::encode(filename);

        VideoDescriptor {
            title: filename.to_string(),
            thumbnail: format!("{}/api/thumbnail/{}", self.base_url, encoded),
            url: format!("{}/api/video/{}", self.base_url, encoded),
        }
    }
}
