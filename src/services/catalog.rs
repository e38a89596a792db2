//! Catalog service: books and authors

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor},
        book::{BookDetails, CreateBook, UpdateBook},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books with author names and availability
    pub async fn list_books(&self) -> AppResult<Vec<BookDetails>> {
        self.repository.books.list().await
    }

    /// Get book details by ID
    pub async fn get_book(&self, id: i64) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book to the catalog (admin action)
    pub async fn add_book(&self, book: CreateBook) -> AppResult<BookDetails> {
        // Surface a clear NotFound instead of a bare constraint violation
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        self.repository.books.create(&book).await
    }

    /// Update a book's bibliographic data (admin action)
    pub async fn update_book(&self, id: i64, book: UpdateBook) -> AppResult<BookDetails> {
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        self.repository.books.update(id, &book).await
    }

    /// List all authors
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get author by ID
    pub async fn get_author(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Add an author (admin action)
    pub async fn add_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }
}
