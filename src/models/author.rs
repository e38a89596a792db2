//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Author record from the store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub biography: Option<String>,
}

/// Create author request (admin action)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub biography: Option<String>,
}
