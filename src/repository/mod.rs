//! Repository layer for record store operations

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookMetadata, Loan},
};

pub use books::PgBookStore;
pub use memory::InMemoryBookStore;

/// Durable table of book records.
///
/// Every method is a single store statement and is atomic on its own.
/// Conditional writes report whether they matched by returning the updated
/// row; `None` means zero rows were affected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Insert an available book and return it with its generated id
    async fn insert(&self, metadata: &BookMetadata) -> AppResult<Book>;

    /// All books, ordered by id
    async fn fetch_all(&self) -> AppResult<Vec<Book>>;

    async fn fetch_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Rewrite title, author and year; loan columns are left alone
    async fn update_metadata(&self, id: i32, metadata: &BookMetadata) -> AppResult<Option<Book>>;

    /// Remove the book and return the number of rows deleted
    async fn delete(&self, id: i32) -> AppResult<u64>;

    /// Start `loan` iff the book exists and is available
    async fn checkout_if_available(&self, id: i32, loan: &Loan) -> AppResult<Option<Book>>;

    /// End the loan iff the book is checked out to exactly `borrower`
    async fn return_if_held_by(&self, id: i32, borrower: &str) -> AppResult<Option<Book>>;
}

/// Main repository struct holding the record store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository over an arbitrary store
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Create a repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(PgBookStore::new(pool)))
    }

    /// Create a repository backed by a fresh in-memory table
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBookStore::new()))
    }
}
