//! Statistics service

use crate::{
    api::stats::{BookStats, LoanStats, StatsResponse, UserStats},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get library statistics: catalog size, registered users, active loans.
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let total_books = self.repository.books.count().await?;
        let total_users = self.repository.users.count().await?;
        let active_loans = self.repository.loans.count_active().await?;

        Ok(StatsResponse {
            books: BookStats { total: total_books },
            users: UserStats { total: total_users },
            loans: LoanStats {
                active: active_loans,
            },
        })
    }
}
