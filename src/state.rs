use std::sync::Arc;

use crate::db::{PhotoStore, UserStore};
use crate::utils::storage::ImageFileStore;

/// Everything a handler needs, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub photos: Arc<dyn PhotoStore>,
    pub users: Arc<dyn UserStore>,
    pub files: ImageFileStore,
    pub jwt_secret: String,
}
