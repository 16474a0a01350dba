//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user-visible data
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{BookName, Error, UserId, UserName, UserSummary};

/// A user with both holdings resolved to book titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    /// User identifier.
    pub id: UserId,
    /// User name.
    pub name: UserName,
    /// Titles of books currently held, in borrow order.
    pub borrowed_books: Vec<BookName>,
    /// Titles of books returned at least once, in first-return order.
    pub returned_books: Vec<BookName>,
}

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users as identifier and name pairs.
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error>;

    /// One user with resolved holdings.
    ///
    /// # Errors
    /// `not_found` when no user has this identifier.
    async fn get_user_detail(&self, id: UserId) -> Result<UserDetail, Error>;
}
