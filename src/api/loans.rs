//! Borrow and return endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::loan::{BorrowBook, LoanDetails, ReturnBook},
};

use super::AuthenticatedUser;

/// Borrow outcome; `borrowed = false` means the book was unavailable
#[derive(Serialize)]
pub struct BorrowResponse {
    pub borrowed: bool,
    pub message: String,
}

/// Return outcome; `returned = false` means no outstanding loan matched
#[derive(Serialize)]
pub struct ReturnResponse {
    pub returned: bool,
    pub message: String,
}

/// Borrow a book for the authenticated user
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BorrowBook>,
) -> AppResult<Json<BorrowResponse>> {
    let borrowed = state
        .services
        .loans
        .borrow(request.book_id, claims.user_id)
        .await?;

    let message = if borrowed {
        "Book borrowed successfully".to_string()
    } else {
        "Book is not available".to_string()
    };

    Ok(Json(BorrowResponse { borrowed, message }))
}

/// Return a book for the authenticated user
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReturnBook>,
) -> AppResult<Json<ReturnResponse>> {
    let returned = state
        .services
        .loans
        .return_book(request.book_id, claims.user_id)
        .await?;

    let message = if returned {
        "Book returned successfully".to_string()
    } else {
        "No outstanding loan for this book".to_string()
    };

    Ok(Json(ReturnResponse { returned, message }))
}

/// Outstanding loans of the authenticated user
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.loans_for_user(claims.user_id).await?;
    Ok(Json(loans))
}
