//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, UserName, UserSummary};

/// Domain use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user with empty holdings.
    async fn create_user(&self, name: UserName) -> Result<UserSummary, Error>;
}
