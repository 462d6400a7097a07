use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
}
