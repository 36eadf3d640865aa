//! User repository implementation.
//!
//! Pantry never writes users; account management is the identity layer's
//! job. These lookups exist for invite-by-username and profile reads.

use sqlx::PgPool;
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::user::User;

/// Repository for read-only user lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by username, case-insensitively, trimming stray
    /// whitespace from the identifier the caller typed.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(username) = lower($1)")
            .bind(username.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }
}
