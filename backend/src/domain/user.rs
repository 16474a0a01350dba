//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::identifier_set::IdentifierSet;
use super::name::{NameValidationError, validate_name};

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable user name, 1–255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, NameValidationError> {
        validate_name(name.into()).map(Self)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Identifier and name pair returned by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// User name.
    pub name: UserName,
}

/// Library member and their book holdings.
///
/// ## Invariants
/// - `borrowed_books` lists the books currently held; the lending state
///   machine never lets an id appear in it twice.
/// - `returned_books` is a history log; repeated borrow/return cycles add
///   repeated entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    borrowed_books: IdentifierSet,
    returned_books: IdentifierSet,
}

impl User {
    /// A freshly created user with no holdings.
    pub fn new(id: UserId, name: UserName) -> Self {
        Self::from_parts(id, name, IdentifierSet::new(), IdentifierSet::new())
    }

    /// Rehydrate a user loaded from storage.
    pub fn from_parts(
        id: UserId,
        name: UserName,
        borrowed_books: IdentifierSet,
        returned_books: IdentifierSet,
    ) -> Self {
        Self {
            id,
            name,
            borrowed_books,
            returned_books,
        }
    }

    /// User identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// User name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Books currently held, in borrow order.
    pub fn borrowed_books(&self) -> &IdentifierSet {
        &self.borrowed_books
    }

    /// Books returned so far, in return order.
    pub fn returned_books(&self) -> &IdentifierSet {
        &self.returned_books
    }

    /// Identifier and name of this user.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub(crate) fn holdings_mut(&mut self) -> (&mut IdentifierSet, &mut IdentifierSet) {
        (&mut self.borrowed_books, &mut self.returned_books)
    }
}
