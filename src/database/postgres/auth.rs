use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{User, ROLE_USER};
use crate::database::repository::AuthorizationRepository;

pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationRepository for PgAuthStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i32, DatabaseError> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .bind(ROLE_USER)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::on_unique_violation(e, DatabaseError::DuplicateUser(username.to_string()))
        })
    }

    async fn get_user(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role FROM users \
             WHERE username = $1 AND password_hash = $2",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("user not found"))
    }
}
