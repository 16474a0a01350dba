//! Driving port for book-facing queries.

use async_trait::async_trait;

use crate::domain::{AverageRating, BookId, BookName, BookSummary, Error};

/// A book with its aggregated rating.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetail {
    /// Book title.
    pub name: BookName,
    /// Mean of all recorded ratings.
    pub average_rating: AverageRating,
}

/// Domain use-case port for reading books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksQuery: Send + Sync {
    /// All books as identifier and title pairs.
    async fn list_books(&self) -> Result<Vec<BookSummary>, Error>;

    /// One book with its average rating.
    ///
    /// # Errors
    /// `not_found` when no book has this identifier.
    async fn get_book_detail(&self, id: BookId) -> Result<BookDetail, Error>;
}
