//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookMetadata, Loan},
};

const BOOK_COLUMNS: &str =
    "id, title, author, year, is_available, checked_out_to, checkout_date, due_date";

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, metadata: &BookMetadata) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, author, year) VALUES ($1, $2, $3) RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&metadata.title)
        .bind(&metadata.author)
        .bind(metadata.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn fetch_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn fetch_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update_metadata(&self, id: i32, metadata: &BookMetadata) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET title = $1, author = $2, year = $3 WHERE id = $4 RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&metadata.title)
        .bind(&metadata.author)
        .bind(metadata.year)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn checkout_if_available(&self, id: i32, loan: &Loan) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET is_available = FALSE, checked_out_to = $1, checkout_date = $2, due_date = $3
            WHERE id = $4 AND is_available = TRUE
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&loan.borrower)
        .bind(loan.checkout_date)
        .bind(loan.due_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn return_if_held_by(&self, id: i32, borrower: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET is_available = TRUE, checked_out_to = NULL, checkout_date = NULL, due_date = NULL
            WHERE id = $1 AND is_available = FALSE AND checked_out_to = $2
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(borrower)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }
}
