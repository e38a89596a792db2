//! Credential service tests: registration, authentication, digest storage.

mod common;

use biblio_server::{
    error::AppError,
    models::user::{RegisterUser, UserClaims},
};
use common::test_state;
use sha2::{Digest, Sha256};

fn register_request(username: &str, password: &str) -> RegisterUser {
    RegisterUser {
        username: username.to_string(),
        password: password.to_string(),
        is_admin: false,
    }
}

#[tokio::test]
async fn register_then_authenticate() {
    let state = test_state("auth-basic").await;
    let users = &state.services.users;

    let id = users
        .register(register_request("alice", "pw1"))
        .await
        .unwrap();

    let user = users
        .authenticate("alice", "pw1")
        .await
        .unwrap()
        .expect("correct credentials must match");
    assert_eq!(user.id, id);
    assert_eq!(user.username, "alice");

    assert!(users.authenticate("alice", "wrong").await.unwrap().is_none());
}

#[tokio::test]
async fn authenticate_unknown_username_is_no_match() {
    let state = test_state("auth-unknown").await;

    let result = state
        .services
        .users
        .authenticate("nobody", "whatever")
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn duplicate_username_conflicts_and_keeps_existing_record() {
    let state = test_state("auth-duplicate").await;
    let users = &state.services.users;

    users
        .register(register_request("carol", "original"))
        .await
        .unwrap();

    let err = users
        .register(register_request("carol", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The first registration still authenticates; the second never landed
    assert!(users
        .authenticate("carol", "original")
        .await
        .unwrap()
        .is_some());
    assert!(users.authenticate("carol", "other").await.unwrap().is_none());
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let state = test_state("auth-empty").await;
    let users = &state.services.users;

    let err = users.register(register_request("", "pw")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = users
        .register(register_request("dave", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = users
        .register(register_request("   ", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn stored_credential_is_a_salted_digest() {
    let state = test_state("auth-digest").await;

    let id = state
        .services
        .users
        .register(register_request("eve", "hunter2"))
        .await
        .unwrap();

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(&state.services.repository.pool)
        .await
        .unwrap();

    assert_ne!(stored, "hunter2");
    assert!(stored.starts_with("$argon2"));

    // Same password registered twice hashes differently (per-user salt)
    let id2 = state
        .services
        .users
        .register(register_request("eve2", "hunter2"))
        .await
        .unwrap();
    let stored2: String = sqlx::query_scalar("SELECT password FROM users WHERE id = ?")
        .bind(id2)
        .fetch_one(&state.services.repository.pool)
        .await
        .unwrap();
    assert_ne!(stored, stored2);
}

#[tokio::test]
async fn legacy_sha256_digest_still_authenticates() {
    let state = test_state("auth-legacy").await;

    // A row migrated from the previous system: unsalted hex SHA-256
    let digest = hex::encode(Sha256::digest(b"oldpassword"));
    sqlx::query("INSERT INTO users (username, password, is_admin) VALUES (?, ?, 0)")
        .bind("migrated")
        .bind(&digest)
        .execute(&state.services.repository.pool)
        .await
        .unwrap();

    let user = state
        .services
        .users
        .authenticate("migrated", "oldpassword")
        .await
        .unwrap();
    assert!(user.is_some());

    let user = state
        .services
        .users
        .authenticate("migrated", "newpassword")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn login_issues_a_decodable_token() {
    let state = test_state("auth-token").await;

    let id = state
        .services
        .users
        .register(register_request("frank", "pw"))
        .await
        .unwrap();

    let (token, user) = state
        .services
        .users
        .login("frank", "pw")
        .await
        .unwrap()
        .expect("login with correct credentials");
    assert_eq!(user.id, id);

    let claims = UserClaims::from_token(&token, &state.config.auth.jwt_secret).unwrap();
    assert_eq!(claims.user_id, id);
    assert_eq!(claims.sub, "frank");
    assert!(!claims.is_admin);

    assert!(state
        .services
        .users
        .login("frank", "wrong")
        .await
        .unwrap()
        .is_none());
}
