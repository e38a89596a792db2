//! Users repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, is_admin FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, is_admin FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is already taken
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Count registered users
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a new user with a pre-hashed credential. Returns the new id.
    ///
    /// The UNIQUE constraint on username is the last line of defence against
    /// a concurrent registration; its violation maps to `Conflict`.
    pub async fn create(&self, username: &str, digest: &str, is_admin: bool) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password, is_admin) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(username)
        .bind(digest)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(id)
    }
}
