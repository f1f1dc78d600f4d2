//! Postgres user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use concierge_core::error::{AppError, ErrorKind};
use concierge_core::result::AppResult;
use concierge_entity::user::{CreateUser, Role, User};

use crate::store::UserStore;

const USER_COLUMNS: &str =
    "id, username, password_hash, display_name, role, expires_at, created_at, updated_at";

/// sqlx-backed [`UserStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(username) = LOWER($1)"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
        })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, display_name, role, expires_at) \
             VALUES ($1, $2, $3, $4, 'epoch') RETURNING {USER_COLUMNS}"
        ))
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.display_name)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::conflict(format!("Username '{}' is already taken", data.username))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    async fn update_expires_at(&self, id: i64, expires_at: DateTime<Utc>) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET expires_at = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(expires_at)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to update user expiry horizon",
                        e,
                    )
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_display_name(
        &self,
        id: i64,
        display_name: Option<&str>,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET display_name = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update display name", e)
        })
    }

    async fn update_role(&self, id: i64, role: Role) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user role", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
