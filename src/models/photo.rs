use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PUBLIC_IMAGE_PREFIX: &str = "/public/images";

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Photo {
    pub id: Uuid,
    pub url: String,
    pub width: i32,
    pub height: i32,
    pub alt: Option<String>,
    pub filename: String,
    pub uploader: Option<Uuid>,
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub url: String,
    pub width: i32,
    pub height: i32,
    pub alt: Option<String>,
    pub filename: String,
    pub uploader: Option<Uuid>,
    pub tag_list: Vec<String>,
}

impl NewPhoto {
    pub fn public_url(filename: &str) -> String {
        format!("{}/{}", PUBLIC_IMAGE_PREFIX, filename)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: Uuid,
    pub url: String,
    pub width: i32,
    pub height: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub filename: String,
    pub tag_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public shape of a photo; `uploader_name` is resolved by the caller.
pub fn to_response_dto(photo: &Photo, uploader_name: Option<String>) -> PhotoResponse {
    PhotoResponse {
        id: photo.id,
        url: photo.url.clone(),
        width: photo.width,
        height: photo.height,
        alt: photo.alt.clone(),
        filename: photo.filename.clone(),
        tag_list: photo.tag_list.clone(),
        uploader: uploader_name,
        created_at: photo.created_at,
        updated_at: photo.updated_at,
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPage {
    pub photo: Vec<Option<PhotoResponse>>,
    pub total_pages: i64,
    pub total_photos: i64,
    pub current_page: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

/// Page arithmetic for a listing; `page` and `per_page` are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = total / per_page + i64::from(total % per_page != 0);

        Pagination {
            page,
            per_page,
            total_pages,
            next_page: if page < total_pages { Some(page + 1) } else { None },
            prev_page: if page > 1 { Some(page - 1) } else { None },
        }
    }

    /// Rows to skip, `None` on overflow.
    pub fn offset(&self) -> Option<i64> {
        (self.page - 1).checked_mul(self.per_page)
    }
}
