//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor},
};

use super::AuthenticatedUser;

/// List all authors
pub async fn list_authors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(authors))
}

/// Get author by ID
pub async fn get_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Author>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Add an author (admin only)
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let author = state.services.catalog.add_author(request).await?;
    Ok((StatusCode::CREATED, Json(author)))
}
