//! Data models for the book lending server

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookMetadata, LendingRequest, LendingState, Loan};
