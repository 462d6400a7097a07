use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

use crate::models::photo::{NewPhoto, Photo};

pub mod photo;
pub mod user;

#[cfg(test)]
pub mod memory;

#[derive(Debug)]
pub enum StoreError {
    DuplicateKey(String),
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey(msg) => write!(f, "duplicate key: {}", msg),
            StoreError::Database(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey(db_err.constraint().unwrap_or("unique constraint").to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Persisted photo metadata.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Fails with `DuplicateKey` when `url` or `filename` is already taken.
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError>;

    /// A window of photos in creation order.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Photo>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Removes at most one photo and hands it back.
    async fn delete_by_filename(&self, filename: &str) -> Result<Option<Photo>, StoreError>;
}

/// Read-only view of user accounts, used to show uploader names.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_username(&self, user_id: Uuid) -> Result<Option<String>, StoreError>;
}

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
