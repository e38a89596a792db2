//! Biblio Library Lending System
//!
//! A Rust implementation of the Biblio library-lending server, providing a
//! REST JSON API for user registration and login, a book catalog, and
//! concurrency-safe borrowing and returning of books.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
