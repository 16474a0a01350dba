//! Book data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::name::{NameValidationError, validate_name};
use super::score_ledger::{Score, ScoreLedger};

/// Storage-assigned book identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i32);

impl BookId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for BookId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Book title, 1–255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookName(String);

impl BookName {
    /// Validate and construct a [`BookName`].
    pub fn new(name: impl Into<String>) -> Result<Self, NameValidationError> {
        validate_name(name.into()).map(Self)
    }
}

impl AsRef<str> for BookName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<BookName> for String {
    fn from(value: BookName) -> Self {
        value.0
    }
}

/// Identifier and title pair returned by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Book identifier.
    pub id: BookId,
    /// Book title.
    pub name: BookName,
}

/// A lendable book and its append-only rating ledger.
///
/// ## Invariants
/// - `scores` only grows, and only through [`Book::record_score`].
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: BookId,
    name: BookName,
    scores: ScoreLedger,
}

impl Book {
    /// A freshly created book with no ratings.
    pub fn new(id: BookId, name: BookName) -> Self {
        Self::from_parts(id, name, ScoreLedger::default())
    }

    /// Rehydrate a book loaded from storage.
    pub fn from_parts(id: BookId, name: BookName, scores: ScoreLedger) -> Self {
        Self { id, name, scores }
    }

    /// Book identifier.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Book title.
    pub fn name(&self) -> &BookName {
        &self.name
    }

    /// Ratings recorded so far, oldest first.
    pub fn scores(&self) -> &ScoreLedger {
        &self.scores
    }

    /// Identifier and title of this book.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub(crate) fn record_score(&mut self, score: Score) {
        self.scores.push(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_book_has_empty_ledger() {
        let book = Book::new(BookId::new(7), BookName::new("Dune").expect("valid name"));
        assert!(book.scores().is_empty());
        assert_eq!(book.summary().id, BookId::new(7));
    }

    #[rstest]
    fn record_score_appends_in_order() {
        let mut book = Book::new(BookId::new(1), BookName::new("Dune").expect("valid name"));
        book.record_score(Score::new(8.0).expect("valid score"));
        book.record_score(Score::new(3.5).expect("valid score"));
        assert_eq!(book.scores().as_slice(), &[8.0, 3.5]);
    }

    #[rstest]
    fn book_id_serialises_as_bare_integer() {
        let value = serde_json::to_value(BookId::new(42)).expect("serialise id");
        assert_eq!(value, serde_json::json!(42));
    }
}
