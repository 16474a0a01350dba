//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the codecs for their persisted text columns, and the
//! lending state machine. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - User, Book: library members and lendable books.
//! - IdentifierSet, ScoreLedger: holdings and ratings with their codecs.
//! - LibraryService: implementation of every driving port.

pub mod error;
pub mod identifier_set;
pub mod lending;
pub mod ports;
pub mod score_ledger;

mod book;
mod library_service;
mod name;
mod rating;
mod row_locks;
mod trace_id;
mod user;

pub use self::book::{Book, BookId, BookName, BookSummary};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identifier_set::{IdentifierSet, MalformedIdentifierList};
pub use self::lending::{LendingError, LendingState};
pub use self::library_service::LibraryService;
pub use self::name::{NAME_MAX, NameValidationError};
pub use self::rating::{AverageRating, NO_RATINGS};
pub use self::row_locks::{RowGuard, RowLocks};
pub use self::score_ledger::{SCORE_MAX, SCORE_MIN, Score, ScoreLedger, ScoreOutOfRange};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserName, UserSummary};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use library_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("book not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
