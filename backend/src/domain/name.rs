//! Shared validation for user and book names.

/// Maximum length of a user or book name, in characters.
pub const NAME_MAX: usize = 255;

/// Validation errors for [`UserName`](super::UserName) and
/// [`BookName`](super::BookName).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameValidationError {
    /// The name was empty or only whitespace.
    #[error("name must not be empty")]
    Empty,
    /// The name exceeded [`NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

impl NameValidationError {
    /// Stable machine-readable code used in validation details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty_name",
            Self::TooLong { .. } => "name_too_long",
        }
    }
}

pub(super) fn validate_name(name: String) -> Result<String, NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Empty);
    }
    if name.chars().count() > NAME_MAX {
        return Err(NameValidationError::TooLong { max: NAME_MAX });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_names(#[case] name: &str) {
        assert_eq!(
            validate_name(name.to_owned()),
            Err(NameValidationError::Empty)
        );
    }

    #[rstest]
    fn accepts_single_character() {
        assert_eq!(validate_name("A".to_owned()), Ok("A".to_owned()));
    }

    #[rstest]
    fn length_is_counted_in_characters() {
        let name = "é".repeat(NAME_MAX);
        assert!(validate_name(name).is_ok());

        let too_long = "é".repeat(NAME_MAX + 1);
        assert_eq!(
            validate_name(too_long),
            Err(NameValidationError::TooLong { max: NAME_MAX })
        );
    }
}
