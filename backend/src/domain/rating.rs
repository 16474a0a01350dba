//! Average rating shown on book detail.

use std::fmt;

/// Text rendered when a book has no ratings.
pub const NO_RATINGS: &str = "No ratings.";

/// Mean of a book's ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageRating {
    /// The ledger is empty.
    NoRatings,
    /// Arithmetic mean of all ratings.
    Mean(f64),
}

impl AverageRating {
    /// Compute the mean of `scores`.
    ///
    /// # Examples
    /// ```
    /// use library_backend::domain::AverageRating;
    ///
    /// assert_eq!(AverageRating::of(&[]).to_string(), "No ratings.");
    /// assert_eq!(AverageRating::of(&[3.0, 4.0, 4.0]).to_string(), "3.7");
    /// ```
    pub fn of(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::NoRatings;
        }
        let total: f64 = scores.iter().sum();
        Self::Mean(total / scores.len() as f64)
    }

    /// The mean, if any ratings exist.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::NoRatings => None,
            Self::Mean(mean) => Some(mean),
        }
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRatings => f.write_str(NO_RATINGS),
            // Ties round up (7.25 -> 7.3); `{:.1}` alone rounds them to even.
            Self::Mean(mean) => write!(f, "{:.1}", (mean * 10.0).round() / 10.0),
        }
    }
}
