//! Checkout and return of books
//!
//! Each transition is one conditional write against the record store. The
//! write's match is the only success signal; when it matches nothing the
//! book is read back purely to pick the error reported to the caller.
//! There is no in-process locking, so the guarantees hold across any number
//! of server instances sharing a database.

use chrono::Utc;

use super::catalog::not_found;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, LendingState, Loan},
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend an available book to `borrower` for one loan period
    pub async fn checkout(&self, id: i32, borrower: &str) -> AppResult<Book> {
        let loan = Loan::starting_at(borrower, Utc::now());

        if let Some(book) = self.repository.books.checkout_if_available(id, &loan).await? {
            tracing::info!(
                "Checkout: book id={} to \"{}\", due {}",
                id,
                borrower,
                loan.due_date
            );
            return Ok(book);
        }

        let err = match self.current_state(id).await? {
            LendingState::CheckedOut(_) => AppError::Conflict("book not available".to_string()),
            LendingState::Available => AppError::Conflict("no book updated".to_string()),
        };
        tracing::debug!("Checkout rejected: book id={}: {}", id, err);
        Err(err)
    }

    /// Take a book back from the borrower currently holding it
    pub async fn return_book(&self, id: i32, borrower: &str) -> AppResult<Book> {
        if let Some(book) = self.repository.books.return_if_held_by(id, borrower).await? {
            tracing::info!("Return: book id={} from \"{}\"", id, borrower);
            return Ok(book);
        }

        let err = match self.current_state(id).await? {
            LendingState::Available => AppError::Conflict("book already available".to_string()),
            LendingState::CheckedOut(_) => AppError::Conflict("no book updated".to_string()),
        };
        tracing::debug!("Return rejected: book id={} by \"{}\": {}", id, borrower, err);
        Err(err)
    }

    async fn current_state(&self, id: i32) -> AppResult<LendingState> {
        let book = self
            .repository
            .books
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        book.lending_state().ok_or_else(|| {
            AppError::Internal(format!("Book {} has inconsistent loan columns", id))
        })
    }
}
