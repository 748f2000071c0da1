use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse};
use tracing::error;

use crate::services::catalog::Catalog;

// Builds the category listing fresh on every request; only the thumbnail
// artifacts behind it are cached.
#[get("/api/categories")]
pub async fn categories(catalog: web::Data<Catalog>) -> HttpResponse {
    match catalog.build().await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(e) => {
            error!("Failed to build catalog: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/api/thumbnail/{filename:.*}")]
pub async fn thumbnail(catalog: web::Data<Catalog>, path: web::Path<String>) -> HttpResponse {
    let filename = path.into_inner();

    match catalog.thumbnails().get(&filename).await {
        Some(bytes) => HttpResponse::Ok().content_type("image/jpeg").body(bytes),
        None => HttpResponse::NotFound().finish(),
    }
}

#[get("/api/video/{filename:.*}")]
pub async fn video(
    req: HttpRequest,
    catalog: web::Data<Catalog>,
    path: web::Path<String>,
) -> HttpResponse {
    let filename = path.into_inner();

    let found = match catalog.find_video(&filename).await {
        Ok(found) => found,
        Err(e) => {
            error!("Failed to look up video {}: {:?}", filename, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    match found {
        Some(video_path) => match NamedFile::open_async(&video_path).await {
            Ok(file) => file
                .set_content_type("video/mp4".parse().expect("valid mime type"))
                .into_response(&req),
            Err(e) => {
                error!("Failed to open video {}: {}", video_path.display(), e);
                video_not_found()
            }
        },
        None => video_not_found(),
    }
}

fn video_not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain")
        .body("Video not found")
}
