//! Credential service: registration and authentication

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user and return the new user id.
    ///
    /// Fails with `Validation` on empty username or password and with
    /// `Conflict` when the username is taken; the existing record is never
    /// touched. Only the argon2 digest of the password is stored.
    pub async fn register(&self, user: RegisterUser) -> AppResult<i64> {
        let username = user.username.trim();
        if username.is_empty() || user.password.is_empty() {
            return Err(AppError::Validation(
                "Username and password must not be empty".to_string(),
            ));
        }

        // Fast path; a concurrent insert is still caught by the UNIQUE
        // constraint inside the repository
        if self.repository.users.username_exists(username).await? {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let digest = self.hash_password(&user.password)?;
        let id = self
            .repository
            .users
            .create(username, &digest, user.is_admin)
            .await?;

        tracing::info!(user_id = id, username, "user registered");
        Ok(id)
    }

    /// Verify credentials against the stored digest.
    ///
    /// Wrong password or unknown username is a no-match (`Ok(None)`), not an
    /// error.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.repository.users.get_by_username(username).await? else {
            return Ok(None);
        };

        if self.verify_password(&user, password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Authenticate and issue a session token on success
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Option<(String, User)>> {
        let Some(user) = self.authenticate(username, password).await? else {
            return Ok(None);
        };

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            is_admin: user.is_admin,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(Some((token, user)))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Hash a password using Argon2 with a per-user random salt
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a supplied password against the stored credential.
    ///
    /// Rows migrated from the previous system hold an unsalted hex SHA-256
    /// digest instead of a PHC string; those are compared against the SHA-256
    /// of the supplied password so migrated accounts keep working.
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        if let Ok(parsed_hash) = PasswordHash::new(&user.password) {
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        let legacy_digest = hex::encode(Sha256::digest(password.as_bytes()));
        Ok(legacy_digest == user.password)
    }
}
