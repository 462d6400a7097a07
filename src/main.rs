mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod routes;
mod state;
mod utils;

#[cfg(test)]
mod test_support;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;
use std::sync::Arc;

use config::Config;
use db::photo::PgPhotoStore;
use db::user::PgUserStore;
use state::AppState;
use utils::storage::ImageFileStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("{}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    // Initialize the database pool and apply migrations
    let pool = db::create_pool(&config.database_url).await.map_err(|err| {
        error!("Failed to connect to the database: {}", err);
        io::Error::new(io::ErrorKind::Other, err)
    })?;

    tokio::fs::create_dir_all(&config.image_dir).await?;

    let state = web::Data::new(AppState {
        photos: Arc::new(PgPhotoStore::new(pool.clone())),
        users: Arc::new(PgUserStore::new(pool)),
        files: ImageFileStore::new(config.image_dir.clone()),
        jwt_secret: config.jwt_secret.clone(),
    });
    let max_payload_bytes = config.max_payload_bytes;

    info!("Storing images in {}", state.files.root().display());

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_payload_bytes))
            .configure(routes::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
