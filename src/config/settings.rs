use std::env;
use std::path::PathBuf;

pub struct Config {
    pub media_root: String,
    pub thumbnail_dir: String,
    pub ffmpeg_bin: String,
    pub ffprobe_bin: String,
    pub host: String,
    pub port: u16,
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let media_root = env::var("MEDIA_ROOT").expect("MEDIA_ROOT not set in the environment");

        let data_path = env::var("DATA_PATH").unwrap_or(".".to_string());
        let thumbnail_dir =
            env::var("THUMBNAIL_DIR").unwrap_or(format!("{}/thumbnails", data_path));

        let ffmpeg_bin = env::var("FFMPEG_BIN").unwrap_or("ffmpeg".to_string());
        let ffprobe_bin = env::var("FFPROBE_BIN").unwrap_or("ffprobe".to_string());

        let host = env::var("WEBSERVER_HOST").unwrap_or("127.0.0.1".to_string());
        let port = env::var("WEBSERVER_PORT")
            .unwrap_or("5001".to_string())
            .parse()
            .expect("WEBSERVER_PORT must be a valid u16");

        let public_url = env::var("PUBLIC_URL").unwrap_or(format!("http://{host}:{port}"));

        Self {
            media_root,
            thumbnail_dir,
            ffmpeg_bin,
            ffprobe_bin,
            host,
            port,
            public_url,
        }
    }

    pub fn media_path(&self) -> PathBuf {
        PathBuf::from(&self.media_root)
    }

    pub fn thumbnail_path(&self) -> PathBuf {
        PathBuf::from(&self.thumbnail_dir)
    }
}
