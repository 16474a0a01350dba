//! Score Ledger Codec.
//!
//! A book's ratings are persisted as text. Two encodings exist in stored
//! data: a JSON array (`"[8,6.5]"`, recognised by a leading `[`) and the
//! comma-joined form (`"8,6.5"`) that every write now produces. Reads fail
//! soft: malformed text is logged and treated as an empty ledger so the read
//! path stays available.

use std::fmt;

use tracing::warn;

/// Lowest accepted rating.
pub const SCORE_MIN: f64 = 0.0;
/// Highest accepted rating.
pub const SCORE_MAX: f64 = 10.0;

/// A single rating in `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score(f64);

/// The rating lies outside `[0, 10]` or is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("score must be a number between {SCORE_MIN} and {SCORE_MAX}, got {value}")]
pub struct ScoreOutOfRange {
    /// The rejected value.
    pub value: f64,
}

impl Score {
    /// Validate and construct a [`Score`].
    pub fn new(value: f64) -> Result<Self, ScoreOutOfRange> {
        if value.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreOutOfRange { value })
        }
    }

    /// The rating value.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Reasons a stored ledger could not be decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreLedgerError {
    /// The legacy JSON array form did not parse.
    #[error("invalid JSON score ledger: {message}")]
    Json {
        /// Parser diagnostic.
        message: String,
    },
    /// A comma-separated segment is not a finite number.
    #[error("invalid score at position {index}: {segment:?}")]
    Segment {
        /// Zero-based segment position.
        index: usize,
        /// The offending segment as stored.
        segment: String,
    },
}

/// Ordered, append-only list of ratings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLedger(Vec<f64>);

impl ScoreLedger {
    /// Ratings in insertion order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of ratings recorded.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no ratings have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, score: Score) {
        self.0.push(score.get());
    }

    /// Persisted text form; always the comma-joined encoding.
    pub fn encode(&self) -> String {
        encode(&self.0)
    }

    /// Decode stored text, logging and returning an empty ledger on failure.
    ///
    /// # Examples
    /// ```
    /// use library_backend::domain::ScoreLedger;
    ///
    /// assert_eq!(ScoreLedger::decode(Some("[1,2,3]")).as_slice(), &[1.0, 2.0, 3.0]);
    /// assert_eq!(ScoreLedger::decode(Some("1,2,3")).as_slice(), &[1.0, 2.0, 3.0]);
    /// assert!(ScoreLedger::decode(Some("1,two")).is_empty());
    /// ```
    pub fn decode(text: Option<&str>) -> Self {
        match try_decode(text) {
            Ok(scores) => Self(scores),
            Err(error) => {
                warn!(%error, stored = ?text, "error parsing scores; treating ledger as empty");
                Self::default()
            }
        }
    }
}

impl From<Vec<f64>> for ScoreLedger {
    fn from(value: Vec<f64>) -> Self {
        Self(value)
    }
}

impl fmt::Display for ScoreLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Encode ratings as a comma-joined list using the shortest decimal form
/// (`8.0` is written as `8`).
pub fn encode(scores: &[f64]) -> String {
    scores
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Strictly decode stored text, accepting both legacy encodings.
///
/// # Errors
/// Returns [`ScoreLedgerError`] when the JSON form does not parse as an
/// array of numbers or any comma segment is not a finite number.
pub fn try_decode(text: Option<&str>) -> Result<Vec<f64>, ScoreLedgerError> {
    let Some(text) = text.filter(|raw| !raw.is_empty()) else {
        return Ok(Vec::new());
    };

    if text.starts_with('[') {
        return serde_json::from_str::<Vec<f64>>(text).map_err(|err| ScoreLedgerError::Json {
            message: err.to_string(),
        });
    }

    text.split(',')
        .enumerate()
        .map(|(index, segment)| {
            segment
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ScoreLedgerError::Segment {
                    index,
                    segment: segment.to_owned(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn absent_or_empty_text_is_empty(#[case] text: Option<&str>) {
        assert!(ScoreLedger::decode(text).is_empty());
    }

    #[rstest]
    #[case("[1,2,3]")]
    #[case("1,2,3")]
    #[case("1, 2 ,3")]
    fn both_legacy_encodings_decode(#[case] text: &str) {
        assert_eq!(try_decode(Some(text)), Ok(vec![1.0, 2.0, 3.0]));
    }

    #[rstest]
    fn comma_encoding_round_trips() {
        let scores = vec![8.0, 6.5, 0.0, 10.0, 3.25];
        let encoded = encode(&scores);
        assert_eq!(encoded, "8,6.5,0,10,3.25");
        assert_eq!(try_decode(Some(&encoded)), Ok(scores));
    }

    #[rstest]
    fn empty_json_array_is_empty_ledger() {
        assert_eq!(try_decode(Some("[]")), Ok(Vec::new()));
    }

    #[rstest]
    #[case("[1,2")]
    #[case("[\"a\"]")]
    #[case("1,x")]
    #[case("1,,2")]
    #[case("NaN")]
    #[case("inf,1")]
    fn malformed_text_fails_soft(#[case] text: &str) {
        assert!(try_decode(Some(text)).is_err());
        assert!(ScoreLedger::decode(Some(text)).is_empty());
    }

    #[rstest]
    #[case(0.0)]
    #[case(10.0)]
    #[case(7.5)]
    fn score_accepts_bounds(#[case] value: f64) {
        assert_eq!(Score::new(value).map(Score::get), Ok(value));
    }

    #[rstest]
    #[case(-0.1)]
    #[case(10.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn score_rejects_out_of_range(#[case] value: f64) {
        assert!(Score::new(value).is_err());
    }
}
