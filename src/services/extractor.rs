use async_process::Command;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::config::settings::Config;
use crate::services::error::ThumbnailError;

// One-third point into the stream. Skips opening credits and leader frames
// without looking at the content itself.
pub fn representative_frame_index(total_frames: u64) -> u64 {
    total_frames / 3
}

#[async_trait]
pub trait FrameExtractor: Send + Sync {
    async fn extract_representative_frame(
        &self,
        video_path: &Path,
    ) -> Result<Vec<u8>, ThumbnailError>;
}

// Extracts frames by shelling out to ffprobe/ffmpeg. Each call runs
// short-lived child processes that are reaped before returning, so no
// decoder handle survives the call on any path.
pub struct FfmpegExtractor {
    ffmpeg_bin: String,
    ffprobe_bin: String,
}

impl FfmpegExtractor {
    pub fn new(config: &Config) -> Self {
        Self {
            ffmpeg_bin: config.ffmpeg_bin.clone(),
            ffprobe_bin: config.ffprobe_bin.clone(),
        }
    }

    async fn count_frames(&self, video_path: &Path) -> Result<u64, ThumbnailError> {
        let output = Command::new(&self.ffprobe_bin)
            .args(["-v", "error", "-count_frames", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=nb_read_frames", "-of", "csv=p=0"])
            .arg(video_path.as_os_str())
            .output()
            .await
            .map_err(|e| ThumbnailError::Open(format!("failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThumbnailError::Open(stderr.trim().to_string()));
        }

        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .map_err(|_| ThumbnailError::Open("no video stream frame count".to_string()))
    }

    async fn decode_frame(
        &self,
        video_path: &Path,
        frame_index: u64,
    ) -> Result<Vec<u8>, ThumbnailError> {
        let output = Command::new(&self.ffmpeg_bin)
            .args(["-v", "error"])
            .arg("-i")
            .arg(video_path.as_os_str())
            .args(["-vf", &format!("select=eq(n\\,{frame_index})")])
            .args(["-frames:v", "1", "-f", "image2pipe", "-c:v", "mjpeg", "pipe:1"])
            .output()
            .await
            .map_err(|e| ThumbnailError::Decode(format!("failed to run ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThumbnailError::Decode(stderr.trim().to_string()));
        }

        if output.stdout.is_empty() {
            return Err(ThumbnailError::Decode(format!(
                "frame {frame_index} yielded no data"
            )));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl FrameExtractor for FfmpegExtractor {
    async fn extract_representative_frame(
        &self,
        video_path: &Path,
    ) -> Result<Vec<u8>, ThumbnailError> {
        if tokio::fs::metadata(video_path).await.is_err() {
            return Err(ThumbnailError::NotFound(video_path.to_path_buf()));
        }

        let total_frames = self.count_frames(video_path).await?;
        let frame_index = representative_frame_index(total_frames);
        debug!(
            "Decoding frame {frame_index}/{total_frames} of {}",
            video_path.display()
        );

        self.decode_frame(video_path, frame_index).await
    }
}

// Stub used across the cache and catalog tests: serves fixed bytes and
// counts how many times extraction was invoked.
#[cfg(test)]
pub struct FakeExtractor {
    pub calls: std::sync::atomic::AtomicUsize,
    pub result: fn(&Path) -> Result<Vec<u8>, ThumbnailError>,
}

#[cfg(test)]
impl FakeExtractor {
    pub fn returning(result: fn(&Path) -> Result<Vec<u8>, ThumbnailError>) -> Self {
        Self {
            calls: std::sync::atomic::AtomicUsize::new(0),
            result,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl FrameExtractor for FakeExtractor {
    async fn extract_representative_frame(
        &self,
        video_path: &Path,
    ) -> Result<Vec<u8>, ThumbnailError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        (self.result)(video_path)
    }
}
