use actix_web::{web, HttpResponse};

use crate::state::AppState;

pub async fn serve_image(state: web::Data<AppState>, image_name: web::Path<String>) -> HttpResponse {
    let image_name = image_name.into_inner();

    match state.files.read(&image_name).await {
        Ok(bytes) => {
            let content_type = image::guess_format(&bytes)
                .map(|format| format.to_mime_type())
                .unwrap_or("application/octet-stream");
            HttpResponse::Ok().content_type(content_type).body(bytes)
        }
        Err(err) => {
            log::error!("Error sending file {}: {}", image_name, err);
            HttpResponse::NotFound().content_type("text/plain; charset=utf-8").body("Image not found")
        }
    }
}
