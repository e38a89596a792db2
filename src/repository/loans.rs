//! Loans repository: the concurrency-safe borrow/return ledger

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::loan::LoanDetails};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Borrow a book for a user.
    ///
    /// The decrement is a conditional update gated on `available_quantity > 0`;
    /// its affected-row count is the success signal, and the loan row is
    /// inserted in the same transaction. Two concurrent borrows of a book
    /// with one available copy cannot both succeed: whichever decrement runs
    /// second affects zero rows.
    ///
    /// Returns `false` (no mutation) when the book is missing or has no
    /// available copies.
    pub async fn borrow(&self, book_id: i64, user_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE books
            SET available_quantity = available_quantity - 1
            WHERE id = ? AND available_quantity > 0
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            // Dropping the transaction rolls it back
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO book_loans (book_id, user_id, loan_date, is_returned)
            VALUES (?, ?, ?, 0)
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(book_id, user_id, "book borrowed");
        Ok(true)
    }

    /// Return a book for a user.
    ///
    /// Marks the most recent outstanding loan for (book, user) as returned
    /// and increments availability in the same transaction. Exactly one loan
    /// is affected per call; a user who borrowed the same title twice must
    /// return it twice.
    ///
    /// Returns `false` (no mutation) when the user holds no outstanding loan
    /// for the book, so availability can never be inflated by a stray return.
    pub async fn return_book(&self, book_id: i64, user_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let loan_id: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM book_loans
            WHERE book_id = ? AND user_id = ? AND is_returned = 0
            ORDER BY loan_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(loan_id) = loan_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE book_loans SET is_returned = 1, return_date = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(loan_id)
            .execute(&mut *tx)
            .await?;

        // The guard keeps availability from ever exceeding the total
        sqlx::query(
            r#"
            UPDATE books
            SET available_quantity = available_quantity + 1
            WHERE id = ? AND available_quantity < quantity
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(book_id, user_id, loan_id, "book returned");
        Ok(true)
    }

    /// Outstanding loans for a user, with book titles (read-only, for display)
    pub async fn loans_for_user(&self, user_id: i64) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT l.id, l.book_id, b.title, l.loan_date, l.return_date, l.is_returned
            FROM book_loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.user_id = ? AND l.is_returned = 0
            ORDER BY l.loan_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Count loans not yet returned
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_loans WHERE is_returned = 0")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
