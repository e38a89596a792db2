//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDetails, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID with its author name
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookDetails> {
        sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.title, b.author_id, a.name AS author_name,
                   b.genre, b.description, b.quantity, b.available_quantity
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            WHERE b.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// List all books with author names
    pub async fn list(&self) -> AppResult<Vec<BookDetails>> {
        let books = sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.title, b.author_id, a.name AS author_name,
                   b.genre, b.description, b.quantity, b.available_quantity
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Count books in the catalog
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new book. All copies start available.
    pub async fn create(&self, book: &CreateBook) -> AppResult<BookDetails> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, author_id, genre, description, quantity, available_quantity)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(book.quantity)
        .bind(book.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                AppError::NotFound(format!("Author with id {:?} not found", book.author_id))
            } else {
                AppError::Database(e)
            }
        })?;

        self.get_by_id(id).await
    }

    /// Update bibliographic fields and total quantity.
    ///
    /// `available_quantity` belongs to the loan ledger; shrinking the total
    /// below the current availability clamps availability down to keep the
    /// `available_quantity <= quantity` invariant.
    pub async fn update(&self, id: i64, book: &UpdateBook) -> AppResult<BookDetails> {
        let affected = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author_id = ?, genre = ?, description = ?,
                quantity = ?, available_quantity = MIN(available_quantity, ?)
            WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(book.quantity)
        .bind(book.quantity)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                AppError::NotFound(format!("Author with id {:?} not found", book.author_id))
            } else {
                AppError::Database(e)
            }
        })?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.get_by_id(id).await
    }
}
