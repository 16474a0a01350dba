//! Driving port for book mutations.

use async_trait::async_trait;

use crate::domain::{BookName, BookSummary, Error};

/// Domain use-case port for adding books to the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksCommand: Send + Sync {
    /// Add a book with an empty rating ledger.
    async fn create_book(&self, name: BookName) -> Result<BookSummary, Error>;
}
