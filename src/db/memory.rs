//! In-process stores backing the handler tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::{PhotoStore, StoreError, UserStore};
use crate::models::photo::{NewPhoto, Photo};

#[derive(Default)]
pub struct MemoryPhotoStore {
    photos: Mutex<Vec<Photo>>,
    reject_creates: bool,
}

impl MemoryPhotoStore {
    /// Every `create` fails as if the filename were already taken.
    pub fn rejecting_creates() -> Self {
        MemoryPhotoStore {
            reject_creates: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        if self.reject_creates {
            return Err(StoreError::DuplicateKey("photos_filename_key".to_string()));
        }

        let mut photos = self.photos.lock().unwrap();

        if photos.iter().any(|p| p.url == photo.url) {
            return Err(StoreError::DuplicateKey("photos_url_key".to_string()));
        }
        if photos.iter().any(|p| p.filename == photo.filename) {
            return Err(StoreError::DuplicateKey("photos_filename_key".to_string()));
        }

        let now = Utc::now();
        let created = Photo {
            id: Uuid::new_v4(),
            url: photo.url,
            width: photo.width,
            height: photo.height,
            alt: photo.alt,
            filename: photo.filename,
            uploader: photo.uploader,
            tag_list: photo.tag_list,
            created_at: now,
            updated_at: now,
        };
        photos.push(created.clone());
        Ok(created)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Photo>, StoreError> {
        let photos = self.photos.lock().unwrap();
        Ok(photos
            .iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.photos.lock().unwrap().len() as i64)
    }

    async fn delete_by_filename(&self, filename: &str) -> Result<Option<Photo>, StoreError> {
        let mut photos = self.photos.lock().unwrap();
        let position = photos.iter().position(|p| p.filename == filename);
        Ok(position.map(|index| photos.remove(index)))
    }
}

/// Users keyed by id. Lookups for ids in `broken` fail with a database error.
#[derive(Default)]
pub struct MemoryUserStore {
    users: HashMap<Uuid, String>,
    broken: Vec<Uuid>,
}

impl MemoryUserStore {
    pub fn with_user(mut self, user_id: Uuid, username: &str) -> Self {
        self.users.insert(user_id, username.to_string());
        self
    }

    pub fn with_broken_lookup(mut self, user_id: Uuid) -> Self {
        self.broken.push(user_id);
        self
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_username(&self, user_id: Uuid) -> Result<Option<String>, StoreError> {
        if self.broken.contains(&user_id) {
            return Err(StoreError::Database("connection reset".to_string()));
        }
        Ok(self.users.get(&user_id).cloned())
    }
}
