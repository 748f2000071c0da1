use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".avi", ".mkv", ".mov"];

pub struct VideoFile {
    pub path: PathBuf,
    pub filename: String,
    pub category: String,
}

// Enumerates one level of category subfolders under the media root. No
// recursion below that level.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // Every direct child directory is a category; anything else at the root
    // is skipped silently.
    pub async fn list_categories(&self) -> std::io::Result<Vec<(String, PathBuf)>> {
        let mut categories = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            categories.push((name, path));
        }

        Ok(categories)
    }

    pub async fn list_videos(
        &self,
        folder: &Path,
        category: &str,
    ) -> std::io::Result<Vec<VideoFile>> {
        let mut videos = Vec::new();
        let mut entries = fs::read_dir(folder).await?;

        while let Some(entry) = entries.next_entry().await? {
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !has_video_extension(&filename) {
                continue;
            }

            videos.push(VideoFile {
                path: entry.path(),
                filename,
                category: category.to_string(),
            });
        }

        Ok(videos)
    }

    // Linear search across all categories for an exact filename match.
    pub async fn find_video(&self, filename: &str) -> std::io::Result<Option<PathBuf>> {
        for (name, folder) in self.list_categories().await? {
            for video in self.list_videos(&folder, &name).await? {
                if video.filename == filename {
                    debug!("Found {} in category {}", filename, video.category);
                    return Ok(Some(video.path));
                }
            }
        }

        Ok(None)
    }
}

fn has_video_extension(filename: &str) -> bool {
    VIDEO_EXTENSIONS.iter().any(|ext| filename.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn fixture_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let comedy = dir.path().join("Comedy");
        let drama = dir.path().join("Drama");
        std::fs::create_dir(&comedy).unwrap();
        std::fs::create_dir(&drama).unwrap();

        File::create(comedy.join("clip.mp4")).unwrap();
        File::create(comedy.join("older.avi")).unwrap();
        File::create(comedy.join("notes.txt")).unwrap();
        File::create(comedy.join("SHOUT.MP4")).unwrap();
        File::create(drama.join("feature.mkv")).unwrap();
        File::create(dir.path().join("stray.mp4")).unwrap();

        dir
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(has_video_extension("clip.mp4"));
        assert!(has_video_extension("clip.mov"));
        assert!(!has_video_extension("clip.MP4"));
        assert!(!has_video_extension("clip.webm"));
        assert!(!has_video_extension("clip.mp4.txt"));
    }

    #[tokio::test]
    async fn categories_are_direct_child_directories_only() {
        let dir = fixture_root();
        let scanner = Scanner::new(dir.path());

        let mut names: Vec<_> = scanner
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        names.sort();

        // stray.mp4 at the root is not a category
        assert_eq!(names, vec!["Comedy", "Drama"]);
    }

    #[tokio::test]
    async fn videos_are_filtered_by_supported_extension() {
        let dir = fixture_root();
        let scanner = Scanner::new(dir.path());

        let mut filenames: Vec<_> = scanner
            .list_videos(&dir.path().join("Comedy"), "Comedy")
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.filename)
            .collect();
        filenames.sort();

        assert_eq!(filenames, vec!["clip.mp4", "older.avi"]);
    }

    #[tokio::test]
    async fn listed_videos_carry_category_and_absolute_path() {
        let dir = fixture_root();
        let scanner = Scanner::new(dir.path());

        let videos = scanner
            .list_videos(&dir.path().join("Drama"), "Drama")
            .await
            .unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].category, "Drama");
        assert_eq!(videos[0].path, dir.path().join("Drama").join("feature.mkv"));
    }

    #[tokio::test]
    async fn find_video_searches_all_categories() {
        let dir = fixture_root();
        let scanner = Scanner::new(dir.path());

        let found = scanner.find_video("feature.mkv").await.unwrap();
        assert_eq!(found, Some(dir.path().join("Drama").join("feature.mkv")));

        assert_eq!(scanner.find_video("missing.mp4").await.unwrap(), None);
        // stray file at the root is not reachable
        assert_eq!(scanner.find_video("stray.mp4").await.unwrap(), None);
    }
}
