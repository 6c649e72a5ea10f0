//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookMetadata},
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

    /// Add a new, available book
    pub async fn create(&self, metadata: &BookMetadata) -> AppResult<Book> {
        let book = self.repository.books.insert(metadata).await?;
        tracing::info!("Catalog create: book id={} \"{}\"", book.id, book.title);
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.fetch_all().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Rewrite the catalog fields of a book. Loan state is untouched.
    pub async fn update(&self, id: i32, metadata: &BookMetadata) -> AppResult<Book> {
        self.repository
            .books
            .update_metadata(id, metadata)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Remove a book whatever its loan state. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let deleted = self.repository.books.delete(id).await?;
        if deleted == 0 {
            tracing::debug!("Catalog delete: no book with id={}", id);
        }
        Ok(())
    }

    /// Check that the record store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}
