//! Lending state machine.
//!
//! The state of a (user, book) pair is never stored. It is derived from
//! whether the book id is in the user's borrowed set:
//!
//! ```text
//!             borrow
//!  Available ────────▶ Borrowed
//!      ▲                   │
//!      └───────────────────┘
//!        return [score?]
//! ```
//!
//! Transitions are pure mutations of in-memory records. Failed transitions
//! leave both records untouched. Persisting the result is the caller's job.

use super::{Book, BookId, Score, User, UserId};

/// Derived lending state for a (user, book) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingState {
    /// The user does not currently hold the book.
    Available,
    /// The user currently holds the book.
    Borrowed,
}

impl LendingState {
    /// Derive the state of `book_id` for `user`.
    pub fn of(user: &User, book_id: BookId) -> Self {
        if user.borrowed_books().contains(book_id) {
            Self::Borrowed
        } else {
            Self::Available
        }
    }
}

/// Lending-rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LendingError {
    /// The user already holds the book.
    #[error("book already borrowed by the user")]
    AlreadyBorrowed {
        /// Borrowing user.
        user_id: UserId,
        /// Requested book.
        book_id: BookId,
    },
    /// The user does not hold the book being returned.
    #[error("book not borrowed by the user")]
    NotBorrowed {
        /// Returning user.
        user_id: UserId,
        /// Returned book.
        book_id: BookId,
    },
}

/// What a successful return changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnOutcome {
    /// Whether a rating was appended to the book's ledger.
    pub score_recorded: bool,
}

/// Move `book_id` from `Available` to `Borrowed` for `user`.
///
/// # Errors
/// [`LendingError::AlreadyBorrowed`] when the user already holds the book.
pub fn borrow(user: &mut User, book_id: BookId) -> Result<(), LendingError> {
    if LendingState::of(user, book_id) == LendingState::Borrowed {
        return Err(LendingError::AlreadyBorrowed {
            user_id: user.id(),
            book_id,
        });
    }
    let (borrowed, _) = user.holdings_mut();
    borrowed.push(book_id);
    Ok(())
}

/// Move `book` from `Borrowed` back to `Available` for `user`.
///
/// Every occurrence of the id is dropped from the borrowed set, exactly one
/// entry is appended to the returned log, and `score`, when given, is
/// appended to the book's ledger.
///
/// # Errors
/// [`LendingError::NotBorrowed`] when the user does not hold the book.
pub fn return_book(
    user: &mut User,
    book: &mut Book,
    score: Option<Score>,
) -> Result<ReturnOutcome, LendingError> {
    let book_id = book.id();
    if LendingState::of(user, book_id) == LendingState::Available {
        return Err(LendingError::NotBorrowed {
            user_id: user.id(),
            book_id,
        });
    }

    let (borrowed, returned) = user.holdings_mut();
    borrowed.remove_all(book_id);
    returned.push(book_id);

    let score_recorded = score.is_some();
    if let Some(score) = score {
        book.record_score(score);
    }
    Ok(ReturnOutcome { score_recorded })
}
