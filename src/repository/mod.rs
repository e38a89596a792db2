//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod loans;
pub mod schema;
pub mod users;

use sqlx::{Pool, Sqlite};

use crate::error::AppResult;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub users: users::UsersRepository,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create schema objects if absent. Idempotent, run once at startup.
    pub async fn init_schema(&self) -> AppResult<()> {
        // sqlx::query executes one statement at a time
        for stmt in schema::SCHEMA.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Cheap connectivity probe for readiness checks
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
