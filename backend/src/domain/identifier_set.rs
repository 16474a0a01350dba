//! Identifier Set Codec.
//!
//! Book holdings are persisted as a flat comma-joined list of decimal ids
//! (`"3,1,12"`); an empty set is the empty string. Rows written by the
//! earliest deployments start from the JSON text `"[]"` and have ids
//! appended after it (`"[],5,2"`); that `[]` segment is skipped on read and
//! never written back. The codec preserves order and performs no
//! deduplication. Membership rules are enforced by the lending state
//! machine, never here.

use tracing::warn;

use super::BookId;

const SEPARATOR: char = ',';
const LEGACY_EMPTY_SEGMENT: &str = "[]";

/// A stored identifier list contained a segment that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed identifier list: segment {index} ({segment:?}) is not an integer")]
pub struct MalformedIdentifierList {
    /// Zero-based position of the offending segment.
    pub index: usize,
    /// The offending segment as stored.
    pub segment: String,
}

/// Ordered collection of book identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet(Vec<BookId>);

impl IdentifierSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` occurs at least once.
    pub fn contains(&self, id: BookId) -> bool {
        self.0.contains(&id)
    }

    /// Append `id` at the end, without checking for duplicates.
    pub fn push(&mut self, id: BookId) {
        self.0.push(id);
    }

    /// Remove every occurrence of `id`, returning how many were removed.
    pub fn remove_all(&mut self, id: BookId) -> usize {
        let before = self.0.len();
        self.0.retain(|held| *held != id);
        before - self.0.len()
    }

    /// Number of occurrences of `id`.
    pub fn count(&self, id: BookId) -> usize {
        self.0.iter().filter(|held| **held == id).count()
    }

    /// Identifiers in insertion order.
    pub fn as_slice(&self) -> &[BookId] {
        &self.0
    }

    /// Number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Persisted text form.
    pub fn encode(&self) -> String {
        encode(&self.0)
    }

    /// Decode persisted text, degrading malformed data to an empty set.
    ///
    /// `column` names the source for the warning emitted on failure.
    pub fn decode_or_empty(text: Option<&str>, column: &str) -> Self {
        match decode(text) {
            Ok(ids) => Self(ids),
            Err(error) => {
                warn!(%error, column, stored = ?text, "discarding malformed identifier list");
                Self::new()
            }
        }
    }
}

impl From<Vec<BookId>> for IdentifierSet {
    fn from(value: Vec<BookId>) -> Self {
        Self(value)
    }
}

impl FromIterator<BookId> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = BookId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Encode identifiers as a comma-joined list.
///
/// # Examples
/// ```
/// use library_backend::domain::{BookId, identifier_set};
///
/// let text = identifier_set::encode(&[BookId::new(3), BookId::new(1)]);
/// assert_eq!(text, "3,1");
/// assert_eq!(identifier_set::encode(&[]), "");
/// ```
pub fn encode(ids: &[BookId]) -> String {
    ids.iter()
        .map(|id| id.get().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a comma-joined list of identifiers.
///
/// Absent or empty text yields an empty sequence. Segments are trimmed of
/// surrounding whitespace before parsing, and legacy `[]` segments are
/// skipped.
///
/// # Examples
/// ```
/// use library_backend::domain::{BookId, identifier_set};
///
/// let ids = identifier_set::decode(Some("[],5,2")).expect("legacy list");
/// assert_eq!(ids, [BookId::new(5), BookId::new(2)]);
/// ```
///
/// # Errors
/// Returns [`MalformedIdentifierList`] for the first segment that is not a
/// 32-bit integer, including empty segments such as in `"1,,2"`.
pub fn decode(text: Option<&str>) -> Result<Vec<BookId>, MalformedIdentifierList> {
    let Some(text) = text.filter(|raw| !raw.is_empty()) else {
        return Ok(Vec::new());
    };

    text.split(SEPARATOR)
        .enumerate()
        .filter(|(_, segment)| segment.trim() != LEGACY_EMPTY_SEGMENT)
        .map(|(index, segment)| {
            segment
                .trim()
                .parse::<i32>()
                .map(BookId::new)
                .map_err(|_| MalformedIdentifierList {
                    index,
                    segment: segment.to_owned(),
                })
        })
        .collect()
}
