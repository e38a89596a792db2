//! User model and related types

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// User record from the store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Password digest (argon2 PHC string, or a legacy hex SHA-256 digest
    /// for rows migrated from the previous system). Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub username: String,
    pub password: String,
}

/// JWT claims for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub user_id: i64,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    /// Gate admin-only operations on the single admin flag
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator access required".to_string(),
            ))
        }
    }
}
