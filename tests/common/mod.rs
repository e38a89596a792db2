//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use biblio_server::{
    config::AppConfig,
    models::{author::CreateAuthor, book::CreateBook, user::RegisterUser},
    repository::Repository,
    services::Services,
    AppState,
};

/// Build an `AppState` backed by a fresh temp-file SQLite database.
pub async fn test_state(name: &str) -> AppState {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "biblio-{}-{}-{}.sqlite",
        name,
        std::process::id(),
        nanos
    ));

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .expect("failed to open test database");

    let repository = Repository::new(pool);
    repository
        .init_schema()
        .await
        .expect("failed to initialize schema");

    let config = AppConfig::default();
    let services = Services::new(repository, config.auth.clone());

    AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    }
}

/// Seed one author and one book with the given number of copies; returns the book id.
pub async fn seed_book(state: &AppState, title: &str, quantity: i64) -> i64 {
    let author = state
        .services
        .catalog
        .add_author(CreateAuthor {
            name: "Test Author".to_string(),
            biography: Some("Wrote the test corpus".to_string()),
        })
        .await
        .expect("failed to seed author");

    let book = state
        .services
        .catalog
        .add_book(CreateBook {
            title: title.to_string(),
            author_id: Some(author.id),
            genre: Some("Fiction".to_string()),
            description: None,
            quantity,
        })
        .await
        .expect("failed to seed book");

    book.id
}

/// Register a regular user; returns the user id.
pub async fn seed_user(state: &AppState, username: &str) -> i64 {
    state
        .services
        .users
        .register(RegisterUser {
            username: username.to_string(),
            password: "password".to_string(),
            is_admin: false,
        })
        .await
        .expect("failed to seed user")
}

/// Current availability of a book.
pub async fn available(state: &AppState, book_id: i64) -> i64 {
    state
        .services
        .catalog
        .get_book(book_id)
        .await
        .expect("book should exist")
        .available_quantity
}

/// Number of loan rows for a book, returned or not.
pub async fn loan_rows(state: &AppState, book_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM book_loans WHERE book_id = ?")
        .bind(book_id)
        .fetch_one(&state.services.repository.pool)
        .await
        .expect("failed to count loans")
}
