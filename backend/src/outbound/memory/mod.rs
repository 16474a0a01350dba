//! In-memory repository adapters.
//!
//! Rows are kept in their persisted text form, exactly as the PostgreSQL
//! adapters store them, so reads go through the same codecs and degrade the
//! same way on malformed data. Used when no database is configured and by
//! tests.

mod book_repository;
mod user_repository;

pub use book_repository::InMemoryBookRepository;
pub use user_repository::InMemoryUserRepository;
