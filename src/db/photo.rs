use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{PhotoStore, StoreError};
use crate::models::photo::{NewPhoto, Photo};

#[derive(Clone)]
pub struct PgPhotoStore {
    pool: PgPool,
}

impl PgPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        let created = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (id, url, width, height, alt, filename, uploader, tag_list)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&photo.url)
        .bind(photo.width)
        .bind(photo.height)
        .bind(&photo.alt)
        .bind(&photo.filename)
        .bind(photo.uploader)
        .bind(&photo.tag_list)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Photo>, StoreError> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos ORDER BY created_at ASC, id ASC OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn delete_by_filename(&self, filename: &str) -> Result<Option<Photo>, StoreError> {
        let deleted = sqlx::query_as::<_, Photo>("DELETE FROM photos WHERE filename = $1 RETURNING *")
            .bind(filename)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}
