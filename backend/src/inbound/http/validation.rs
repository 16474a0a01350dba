//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection becomes an `invalid_request` error whose details name the
//! offending field and a stable code.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::{
    BookId, BookName, Error, NameValidationError, SCORE_MAX, SCORE_MIN, Score, ScoreOutOfRange,
    UserId, UserName,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidInteger,
    ScoreOutOfRange,
    InvalidBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInteger => "invalid_integer",
            Self::ScoreOutOfRange => "score_out_of_range",
            Self::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const SCORE: FieldName = FieldName::new("score");
pub(crate) const ID: FieldName = FieldName::new("id");
pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const BOOK_ID: FieldName = FieldName::new("bookId");

fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::InvalidInteger.as_str(),
    }))
}

fn parse_integer(value: &str, field: FieldName) -> Result<i32, Error> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid_integer_error(field, value))
}

/// Parse a user identifier from a path segment.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_integer(value, field).map(UserId::new)
}

/// Parse a book identifier from a path segment.
pub(crate) fn parse_book_id(value: &str, field: FieldName) -> Result<BookId, Error> {
    parse_integer(value, field).map(BookId::new)
}

fn name_error(err: NameValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": NAME.as_str(),
        "code": err.code(),
    }))
}

pub(crate) fn user_name(raw: String) -> Result<UserName, Error> {
    UserName::new(raw).map_err(name_error)
}

pub(crate) fn book_name(raw: String) -> Result<BookName, Error> {
    BookName::new(raw).map_err(name_error)
}

fn score_error(err: ScoreOutOfRange) -> Error {
    Error::invalid_request(format!(
        "score must be a number between {SCORE_MIN} and {SCORE_MAX}"
    ))
    .with_details(json!({
        "field": SCORE.as_str(),
        "value": err.value,
        "code": ValidationCode::ScoreOutOfRange.as_str(),
    }))
}

pub(crate) fn score(raw: Option<f64>) -> Result<Option<Score>, Error> {
    raw.map(|value| Score::new(value).map_err(score_error))
        .transpose()
}

fn invalid_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("invalid request body: {reason}")).with_details(json!({
        "code": ValidationCode::InvalidBody.as_str(),
    }))
}

/// Decode an optional JSON body; an empty body yields `None`.
pub(crate) fn optional_json<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(invalid_body_error)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid_body_error(&err).into()
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::Value;

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a Value> {
        err.details().and_then(|details| details.get(key))
    }

    #[rstest]
    #[case("7", 7)]
    #[case("-3", -3)]
    #[case(" 12 ", 12)]
    fn integer_segments_parse(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_user_id(raw, USER_ID).map(UserId::get), Ok(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("99999999999")]
    #[case("")]
    fn non_integer_segments_are_rejected(#[case] raw: &str) {
        let err = parse_book_id(raw, BOOK_ID).expect_err("not an integer");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some(&json!("bookId")));
        assert_eq!(detail(&err, "code"), Some(&json!("invalid_integer")));
        assert_eq!(detail(&err, "value"), Some(&json!(raw)));
    }

    #[rstest]
    #[case(String::new(), "empty_name")]
    #[case("x".repeat(256), "name_too_long")]
    fn invalid_names_report_field_and_code(#[case] raw: String, #[case] code: &str) {
        let err = user_name(raw).expect_err("invalid name");
        assert_eq!(detail(&err, "field"), Some(&json!("name")));
        assert_eq!(detail(&err, "code"), Some(&json!(code)));
    }

    #[rstest]
    fn absent_score_is_allowed() {
        assert_eq!(score(None), Ok(None));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(10.5)]
    fn out_of_range_score_is_rejected(#[case] value: f64) {
        let err = score(Some(value)).expect_err("out of range");
        assert_eq!(detail(&err, "code"), Some(&json!("score_out_of_range")));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Probe {
        score: Option<f64>,
    }

    #[rstest]
    #[case(b"")]
    #[case(b"  \n")]
    fn blank_body_is_absent(#[case] body: &[u8]) {
        assert_eq!(optional_json::<Probe>(body), Ok(None));
    }

    #[rstest]
    fn json_body_is_decoded() {
        let parsed = optional_json::<Probe>(br#"{"score": 4}"#).expect("valid body");
        assert_eq!(parsed, Some(Probe { score: Some(4.0) }));
    }

    #[rstest]
    #[case(br#"{"score": "high"}"#.as_slice())]
    #[case(br#"{"rating": 4}"#.as_slice())]
    #[case(b"{".as_slice())]
    fn malformed_body_is_invalid_request(#[case] body: &[u8]) {
        let err = optional_json::<Probe>(body).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "code"), Some(&json!("invalid_body")));
    }
}
