//! Driving port for lending transitions.
//!
//! Both operations either apply fully or leave the user and book untouched.

use async_trait::async_trait;

use crate::domain::{BookId, Error, Score, UserId};

/// Domain use-case port for borrowing and returning books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LendingCommand: Send + Sync {
    /// Lend `book_id` to `user_id`.
    ///
    /// # Errors
    /// `not_found` when either record is missing, `already_borrowed` when
    /// the user already holds the book.
    async fn borrow(&self, user_id: UserId, book_id: BookId) -> Result<(), Error>;

    /// Take `book_id` back from `user_id`, optionally recording a rating.
    ///
    /// # Errors
    /// `not_found` when either record is missing, `not_borrowed` when the
    /// user does not hold the book.
    async fn return_book(
        &self,
        user_id: UserId,
        book_id: BookId,
        score: Option<Score>,
    ) -> Result<(), Error>;
}
