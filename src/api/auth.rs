//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginUser, RegisterUser, User},
};

use super::AuthenticatedUser;

/// Register response
#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
}

/// Login response with session token
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: User,
}

/// Register a new user account
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let username = request.username.trim().to_string();
    let id = state.services.users.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { id, username }),
    ))
}

/// Log in and receive a session token
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginUser>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .users
        .login(&request.username, &request.password)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user,
    }))
}

/// Get the current authenticated user
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(claims.user_id).await?;
    Ok(Json(user))
}
