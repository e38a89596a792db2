//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Loan with book title for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoanDetails {
    pub id: i64,
    pub book_id: i64,
    pub title: String,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub is_returned: bool,
}

/// Borrow request for the authenticated user
#[derive(Debug, Deserialize)]
pub struct BorrowBook {
    pub book_id: i64,
}

/// Return request for the authenticated user
#[derive(Debug, Deserialize)]
pub struct ReturnBook {
    pub book_id: i64,
}
