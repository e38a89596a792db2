//! Loan ledger service

use crate::{error::AppResult, models::loan::LoanDetails, repository::Repository};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a user. `false` means the book is unavailable or
    /// does not exist; no mutation happened.
    pub async fn borrow(&self, book_id: i64, user_id: i64) -> AppResult<bool> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.loans.borrow(book_id, user_id).await
    }

    /// Return a book for a user. `false` means the user holds no outstanding
    /// loan for this book; no mutation happened.
    pub async fn return_book(&self, book_id: i64, user_id: i64) -> AppResult<bool> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.loans.return_book(book_id, user_id).await
    }

    /// Outstanding loans for a user
    pub async fn loans_for_user(&self, user_id: i64) -> AppResult<Vec<LoanDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.loans.loans_for_user(user_id).await
    }
}
