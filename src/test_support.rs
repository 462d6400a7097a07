use actix_web::web;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

use crate::db::memory::{MemoryPhotoStore, MemoryUserStore};
use crate::state::AppState;
use crate::utils::jwt::{self, ADMIN_ROLE};
use crate::utils::storage::ImageFileStore;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub admin_id: Uuid,
    // Keeps the managed directory alive for the test
    pub _dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_users(|users| users)
    }

    /// `configure` receives a user store that already knows the admin as "admin".
    pub fn with_users(configure: impl FnOnce(MemoryUserStore) -> MemoryUserStore) -> Self {
        Self::with_stores(MemoryPhotoStore::default(), configure)
    }

    pub fn with_photo_store(photos: MemoryPhotoStore) -> Self {
        Self::with_stores(photos, |users| users)
    }

    fn with_stores(
        photos: MemoryPhotoStore,
        configure: impl FnOnce(MemoryUserStore) -> MemoryUserStore,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let admin_id = Uuid::new_v4();
        let users = configure(MemoryUserStore::default().with_user(admin_id, "admin"));

        let state = web::Data::new(AppState {
            photos: Arc::new(photos),
            users: Arc::new(users),
            files: ImageFileStore::new(dir.path().join("images")),
            jwt_secret: TEST_SECRET.to_string(),
        });

        TestContext { state, admin_id, _dir: dir }
    }

    pub fn admin_bearer(&self) -> String {
        format!("Bearer {}", jwt::generate_token(&self.admin_id.to_string(), ADMIN_ROLE, TEST_SECRET))
    }
}

/// Builds the routed test service around a `TestContext`.
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .configure(crate::routes::configure),
        )
        .await
    };
}

pub(crate) use init_app;
