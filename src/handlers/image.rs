use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::db::{StoreError, UserStore};
use crate::errors::AppError;
use crate::models::photo::{to_response_dto, NewPhoto, Pagination, Photo, PhotoPage, PhotoResponse};
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::{filename, image};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 40;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImageQueryParams {
    #[validate(range(min = 1))]
    page: Option<i64>,
    #[validate(range(min = 1))]
    per_page: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest {
    file: UploadFile,
    alt: Option<String>,
    #[serde(default)]
    tag_list: Vec<String>,
}

#[derive(Deserialize)]
struct UploadFile {
    buffer: UploadBuffer,
}

#[derive(Deserialize)]
struct UploadBuffer {
    data: Vec<u8>,
}

async fn resolve_uploader(users: &dyn UserStore, photo: &Photo) -> Result<Option<String>, StoreError> {
    match photo.uploader {
        Some(user_id) => users.find_username(user_id).await,
        None => Ok(None),
    }
}

async fn project_photo(users: &dyn UserStore, photo: &Photo) -> Option<PhotoResponse> {
    match resolve_uploader(users, photo).await {
        Ok(uploader) => Some(to_response_dto(photo, uploader)),
        Err(err) => {
            log::error!("Error processing photo {}: {}", photo.id, err);
            None
        }
    }
}

pub async fn list_images(
    _admin: AdminUser,
    state: web::Data<AppState>,
    query: web::Query<ImageQueryParams>,
) -> Result<HttpResponse, actix_web::Error> {
    query.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);

    let total_photos = state.photos.count().await.map_err(|e| {
        log::error!("Error counting images: {}", e);
        AppError::from(e)
    })?;

    let pagination = Pagination::new(page, per_page, total_photos);
    let skip = pagination.offset()
        .ok_or_else(|| AppError::BadRequest("Page is out of range".to_string()))?;

    let photos = state.photos.list(skip, per_page).await.map_err(|e| {
        log::error!("Error retrieving images: {}", e);
        AppError::from(e)
    })?;

    // A failed projection becomes null instead of failing the page
    let users = state.users.as_ref();
    let photo = join_all(photos.iter().map(|p| project_photo(users, p))).await;

    Ok(HttpResponse::Ok().json(PhotoPage {
        photo,
        total_pages: pagination.total_pages,
        total_photos,
        current_page: pagination.page,
        next_page: pagination.next_page,
        prev_page: pagination.prev_page,
    }))
}

pub async fn upload_image(
    req: HttpRequest,
    admin: AdminUser,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, actix_web::Error> {
    // Non-ASCII names are decoded lossily, sanitize maps them to `_` anyway
    let original_name = req.headers().get("filename")
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest("No filename specified".to_string()))?;

    // Accepted whatever the content type, octet-stream bodies carry JSON too
    let upload: UploadRequest = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("Invalid upload body: {}", err)))?;

    let unique_filename = filename::generate_unique_name(&filename::sanitize(&original_name));

    let image_path = state.files.write(&unique_filename, &upload.file.buffer.data).await.map_err(|e| {
        log::error!("Error saving image {}: {}", unique_filename, e);
        AppError::from(e)
    })?;

    let metadata = match image::extract_metadata(&image_path).await {
        Ok(metadata) => metadata,
        Err(err) => {
            log::warn!("Rejected upload {}: {}", unique_filename, err);
            discard_file(&state, &unique_filename).await;
            return Err(AppError::from(err).into());
        }
    };

    let new_photo = NewPhoto {
        url: NewPhoto::public_url(&unique_filename),
        width: metadata.width,
        height: metadata.height,
        alt: upload.alt,
        filename: unique_filename.clone(),
        uploader: Some(admin.user_id),
        tag_list: upload.tag_list,
    };

    let photo = match state.photos.create(new_photo).await {
        Ok(photo) => photo,
        Err(err) => {
            log::error!("Error saving image record {}: {}", unique_filename, err);
            discard_file(&state, &unique_filename).await;
            return Err(AppError::from(err).into());
        }
    };

    let uploader = resolve_uploader(state.users.as_ref(), &photo).await.unwrap_or_else(|err| {
        log::warn!("Could not resolve uploader for photo {}: {}", photo.id, err);
        None
    });

    log::info!("Stored image {} ({}x{})", photo.filename, photo.width, photo.height);

    Ok(HttpResponse::Ok().json(json!({
        "photo": to_response_dto(&photo, uploader),
    })))
}

/// Removes a file whose record was never created.
async fn discard_file(state: &AppState, filename: &str) {
    if let Err(err) = state.files.remove(filename).await {
        log::error!("Error discarding orphaned image {}: {}", filename, err);
    }
}

pub async fn delete_image(
    _admin: AdminUser,
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let filename = filename.into_inner();
    if filename.trim().is_empty() {
        return Err(AppError::BadRequest("No filename specified".to_string()).into());
    }

    let deleted = state.photos.delete_by_filename(&filename).await.map_err(|e| {
        log::error!("Error deleting image record {}: {}", filename, e);
        AppError::from(e)
    })?;

    if deleted.is_none() {
        return Err(AppError::NotFound("photo not found".to_string()).into());
    }

    let removed = state.files.remove(&filename).await.map_err(|e| {
        log::error!("Error deleting image file {}: {}", filename, e);
        AppError::from(e)
    })?;

    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound("Image not found".to_string()).into())
    }
}

pub async fn missing_filename(_admin: AdminUser) -> Result<HttpResponse, actix_web::Error> {
    Err(AppError::BadRequest("No filename specified".to_string()).into())
}
