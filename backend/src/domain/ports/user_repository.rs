//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId, UserName, UserSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for library members and their holdings.
///
/// Adapters persist both identifier sets through the identifier set codec
/// and never interpret the stored text any other way.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user with empty holdings and return the assigned identifier.
    async fn create(&self, name: &UserName) -> Result<UserId, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// All users, ordered by identifier.
    async fn list(&self) -> Result<Vec<UserSummary>, UserPersistenceError>;

    /// Persist the name and both holdings of an existing user.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;
}
