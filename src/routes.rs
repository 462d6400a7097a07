use actix_web::{error, web};

use crate::errors::AppError;
use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/images")
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                error::Error::from(AppError::BadRequest(err.to_string()))
            }))
            .route("", web::get().to(handlers::image::list_images))
            .route("/", web::get().to(handlers::image::list_images))
            .route("/upload", web::post().to(handlers::image::upload_image))
            .route("/delete/", web::delete().to(handlers::image::missing_filename))
            .route("/delete/{filename}", web::delete().to(handlers::image::delete_image)),
    )
    .service(
        web::resource("/public/images/{image_name}")
            .route(web::get().to(handlers::public::serve_image)),
    );
}
