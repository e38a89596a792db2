//! Statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Statistics response
#[derive(Serialize)]
pub struct StatsResponse {
    /// Catalog statistics
    pub books: BookStats,
    /// User statistics
    pub users: UserStats,
    /// Loan statistics
    pub loans: LoanStats,
}

#[derive(Serialize)]
pub struct BookStats {
    /// Total number of books in the catalog
    pub total: i64,
}

#[derive(Serialize)]
pub struct UserStats {
    /// Total number of registered users
    pub total: i64,
}

#[derive(Serialize)]
pub struct LoanStats {
    /// Loans not yet returned
    pub active: i64,
}

/// Get library statistics (admin only)
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    claims.require_admin()?;

    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
