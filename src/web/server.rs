use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

use crate::config::settings::Config;
use crate::services::catalog::Catalog;
use crate::web::handlers;

pub async fn run_server(
    catalog: web::Data<Catalog>,
    config: Arc<Config>,
    shutdown_signal: Arc<Notify>,
) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host, config.port)
        .parse::<SocketAddr>()
        .expect("Failed to parse host and port into SocketAddr");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(catalog.clone())
            .service(handlers::categories)
            .service(handlers::thumbnail)
            .service(handlers::video)
    })
    .bind(addr)?;

    info!("Starting catalog server on: {addr}");

    let server_handle = server.run();

    tokio::select! {
        result = server_handle => result,
        _ = shutdown_signal.notified() => {
            info!("Shutdown signal received, stopping web server");
            Ok(())
        }
    }
}
