//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Book with author name for listing and detail views.
///
/// Invariant: `0 <= available_quantity <= quantity`. The ledger's conditional
/// updates are the only writers of `available_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookDetails {
    pub id: i64,
    pub title: String,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    pub available_quantity: i64,
}

/// Create book request (admin action)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub author_id: Option<i64>,
    pub genre: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

/// Update book request (admin action). Edits bibliographic fields and the
/// total quantity; availability is only ever touched by the loan ledger.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub author_id: Option<i64>,
    pub genre: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}
