//! In-memory book store, for tests and local runs without a database

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookMetadata, Loan},
};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Book>,
}

/// Book table held in process memory.
///
/// Each method takes the lock once, so every call behaves like a single
/// atomic statement against a database.
#[derive(Default)]
pub struct InMemoryBookStore {
    table: RwLock<Table>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn insert(&self, metadata: &BookMetadata) -> AppResult<Book> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("book id sequence exhausted".to_string()))?;
        table.last_id = id;
        let book = Book::new(id, metadata.clone());
        table.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn fetch_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn fetch_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update_metadata(&self, id: i32, metadata: &BookMetadata) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|book| {
            book.apply_metadata(metadata);
            book.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn checkout_if_available(&self, id: i32, loan: &Loan) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        Ok(table
            .rows
            .get_mut(&id)
            .filter(|book| book.is_available)
            .map(|book| {
                book.apply_loan(loan);
                book.clone()
            }))
    }

    async fn return_if_held_by(&self, id: i32, borrower: &str) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        Ok(table
            .rows
            .get_mut(&id)
            .filter(|book| {
                !book.is_available && book.checked_out_to.as_deref() == Some(borrower)
            })
            .map(|book| {
                book.clear_loan();
                book.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn metadata(title: &str) -> BookMetadata {
        BookMetadata {
            title: title.to_string(),
            author: "Herman Melville".to_string(),
            year: 1851,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryBookStore::new();
        let first = store.insert(&metadata("Moby-Dick")).await.unwrap();
        let second = store.insert(&metadata("Typee")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_available);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryBookStore::new();
        let first = store.insert(&metadata("Moby-Dick")).await.unwrap();
        assert_eq!(store.delete(first.id).await.unwrap(), 1);
        let second = store.insert(&metadata("Typee")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_insert_fails_when_ids_exhausted() {
        let store = InMemoryBookStore {
            table: RwLock::new(Table {
                last_id: i32::MAX - 1,
                rows: BTreeMap::new(),
            }),
        };
        let last = store.insert(&metadata("Moby-Dick")).await.unwrap();
        assert_eq!(last.id, i32::MAX);

        let err = store.insert(&metadata("Typee")).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(store.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_in_id_order() {
        let store = InMemoryBookStore::new();
        for title in ["A", "B", "C"] {
            store.insert(&metadata(title)).await.unwrap();
        }
        let ids: Vec<i32> = store.fetch_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_checkout_only_matches_available_rows() {
        let store = InMemoryBookStore::new();
        let book = store.insert(&metadata("Moby-Dick")).await.unwrap();
        let loan = Loan::starting_at("alice", Utc::now());

        assert!(store.checkout_if_available(book.id, &loan).await.unwrap().is_some());
        assert!(store.checkout_if_available(book.id, &loan).await.unwrap().is_none());
        assert!(store.checkout_if_available(99, &loan).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_return_requires_matching_borrower() {
        let store = InMemoryBookStore::new();
        let book = store.insert(&metadata("Moby-Dick")).await.unwrap();
        let loan = Loan::starting_at("alice", Utc::now());
        store.checkout_if_available(book.id, &loan).await.unwrap();

        assert!(store.return_if_held_by(book.id, "bob").await.unwrap().is_none());
        assert!(store.return_if_held_by(book.id, "Alice").await.unwrap().is_none());

        let returned = store.return_if_held_by(book.id, "alice").await.unwrap().unwrap();
        assert!(returned.is_available);
        assert!(returned.is_consistent());
    }

    #[tokio::test]
    async fn test_update_metadata_keeps_loan() {
        let store = InMemoryBookStore::new();
        let book = store.insert(&metadata("Moby-Dick")).await.unwrap();
        let loan = Loan::starting_at("alice", Utc::now());
        store.checkout_if_available(book.id, &loan).await.unwrap();

        let updated = store
            .update_metadata(book.id, &metadata("Moby-Dick; or, The Whale"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Moby-Dick; or, The Whale");
        assert_eq!(updated.checked_out_to.as_deref(), Some("alice"));
        assert!(store.update_metadata(99, &metadata("X")).await.unwrap().is_none());
    }
}
