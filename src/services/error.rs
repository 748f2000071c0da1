use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("video not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to open video stream: {0}")]
    Open(String),

    #[error("failed to decode frame: {0}")]
    Decode(String),

    #[error("failed to write thumbnail: {0}")]
    CacheWrite(#[source] std::io::Error),
}
