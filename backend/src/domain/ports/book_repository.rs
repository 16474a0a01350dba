//! Port abstraction for book persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Book, BookId, BookName, BookSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by book repository adapters.
    pub enum BookPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "book repository query failed: {message}",
    }
}

/// Storage for books and their rating ledgers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a book with an empty ledger and return the assigned identifier.
    async fn create(&self, name: &BookName) -> Result<BookId, BookPersistenceError>;

    /// Fetch a book by identifier.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookPersistenceError>;

    /// Batch lookup of titles. Unknown identifiers are omitted and the
    /// result order is unspecified.
    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<BookSummary>, BookPersistenceError>;

    /// All books, ordered by identifier.
    async fn list(&self) -> Result<Vec<BookSummary>, BookPersistenceError>;

    /// Persist the name and rating ledger of an existing book.
    async fn save(&self, book: &Book) -> Result<(), BookPersistenceError>;
}
