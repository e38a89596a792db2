//! Authors repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name, biography FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// List all authors
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors =
            sqlx::query_as::<_, Author>("SELECT id, name, biography FROM authors ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(authors)
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO authors (name, biography) VALUES (?, ?) RETURNING id",
        )
        .bind(&author.name)
        .bind(&author.biography)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }
}
