//! Book model and lending state

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Length of every loan
pub const LOAN_PERIOD_DAYS: i64 = 21;

pub fn loan_period() -> Duration {
    Duration::days(LOAN_PERIOD_DAYS)
}

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    pub is_available: bool,
    /// Borrower holding the book, set only while checked out
    pub checked_out_to: Option<String>,
    pub checkout_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}

/// An active loan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub borrower: String,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl Loan {
    /// Start a loan at `checkout_date`, due one loan period later.
    ///
    /// Timestamps are truncated to microseconds, the precision of a
    /// PostgreSQL `TIMESTAMPTZ`, so the stored due date stays exactly one
    /// loan period after the stored checkout date.
    pub fn starting_at(borrower: impl Into<String>, checkout_date: DateTime<Utc>) -> Self {
        let checkout_date = checkout_date.trunc_subsecs(6);
        Self {
            borrower: borrower.into(),
            checkout_date,
            due_date: checkout_date + loan_period(),
        }
    }
}

/// Lending lifecycle of a single book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendingState {
    Available,
    CheckedOut(Loan),
}

impl Book {
    /// Build a freshly created, available book
    pub fn new(id: i32, metadata: BookMetadata) -> Self {
        Self {
            id,
            title: metadata.title,
            author: metadata.author,
            year: metadata.year,
            is_available: true,
            checked_out_to: None,
            checkout_date: None,
            due_date: None,
        }
    }

    /// Current lending state, or `None` if the loan columns are only
    /// partially populated.
    pub fn lending_state(&self) -> Option<LendingState> {
        match (
            self.is_available,
            &self.checked_out_to,
            self.checkout_date,
            self.due_date,
        ) {
            (true, None, None, None) => Some(LendingState::Available),
            (false, Some(borrower), Some(checkout_date), Some(due_date)) => {
                Some(LendingState::CheckedOut(Loan {
                    borrower: borrower.clone(),
                    checkout_date,
                    due_date,
                }))
            }
            _ => None,
        }
    }

    /// Whether the availability flag, loan columns and due date agree
    pub fn is_consistent(&self) -> bool {
        match self.lending_state() {
            Some(LendingState::Available) => true,
            Some(LendingState::CheckedOut(loan)) => {
                loan.due_date - loan.checkout_date == loan_period()
            }
            None => false,
        }
    }

    pub(crate) fn apply_loan(&mut self, loan: &Loan) {
        self.is_available = false;
        self.checked_out_to = Some(loan.borrower.clone());
        self.checkout_date = Some(loan.checkout_date);
        self.due_date = Some(loan.due_date);
    }

    pub(crate) fn clear_loan(&mut self) {
        self.is_available = true;
        self.checked_out_to = None;
        self.checkout_date = None;
        self.due_date = None;
    }

    pub(crate) fn apply_metadata(&mut self, metadata: &BookMetadata) {
        self.title = metadata.title.clone();
        self.author = metadata.author.clone();
        self.year = metadata.year;
    }
}

/// Catalog fields of a book, used for create and update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct BookMetadata {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub year: i32,
}

/// Checkout or return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LendingRequest {
    /// Borrower identity, trusted as given
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
}
