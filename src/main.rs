mod config;
mod services;
mod web;

use actix_web::web::Data;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{error, info};

use crate::config::settings::Config;
use crate::services::catalog::Catalog;
use crate::services::extractor::FfmpegExtractor;
use crate::services::store::DiskStore;
use crate::services::thumbnails::ThumbnailCache;
use crate::web::server::run_server;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();
    info!("Logging initialized, starting the application");

    let config = Arc::new(Config::from_env());

    // Create the thumbnail store directory
    tokio::fs::create_dir_all(config.thumbnail_path())
        .await
        .expect("Failed to create thumbnail directory");

    let store = Arc::new(DiskStore::new(config.thumbnail_path()));
    let extractor = Arc::new(FfmpegExtractor::new(&config));
    let thumbnails = Arc::new(ThumbnailCache::new(store, extractor));
    let catalog = Data::new(Catalog::new(&config, thumbnails));

    // Create shutdown signal
    let shutdown = Arc::new(Notify::new());

    let notify = shutdown.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        info!("Ctrl+C received, shutting down");
        notify.notify_waiters();
    });

    if let Err(e) = run_server(catalog, config, shutdown).await {
        error!("Catalog server error: {:?}", e);
    }

    info!("Shutdown complete");
}
