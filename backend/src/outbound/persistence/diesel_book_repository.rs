//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookPersistenceError, BookRepository};
use crate::domain::{Book, BookId, BookName, BookSummary, ScoreLedger};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookRow, BookSummaryRow, BookUpdate, NewBookRow};
use super::pool::{DbPool, PoolError};
use super::schema::books;

/// Diesel-backed implementation of the `BookRepository` port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> BookPersistenceError {
    map_pool_error(error, |message| BookPersistenceError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> BookPersistenceError {
    map_diesel_error(
        error,
        |message| BookPersistenceError::query(message),
        |message| BookPersistenceError::connection(message),
    )
}

fn decode_name(id: i32, raw: String) -> Result<BookName, BookPersistenceError> {
    BookName::new(raw)
        .map_err(|err| BookPersistenceError::query(format!("stored name for book {id}: {err}")))
}

/// Convert a database row to a domain book, decoding the ledger fail-soft.
fn row_to_book(row: BookRow) -> Result<Book, BookPersistenceError> {
    let scores = ScoreLedger::decode(row.scores.as_deref());
    Ok(Book::from_parts(
        BookId::new(row.id),
        decode_name(row.id, row.name)?,
        scores,
    ))
}

fn row_to_summary(row: BookSummaryRow) -> Result<BookSummary, BookPersistenceError> {
    Ok(BookSummary {
        id: BookId::new(row.id),
        name: decode_name(row.id, row.name)?,
    })
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn create(&self, name: &BookName) -> Result<BookId, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let empty = ScoreLedger::default().encode();
        let new_row = NewBookRow {
            name: name.as_ref(),
            scores: &empty,
        };

        diesel::insert_into(books::table)
            .values(&new_row)
            .returning(books::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(BookId::new)
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<BookRow> = books::table
            .find(id.get())
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_book).transpose()
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<BookSummary>, BookPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let rows: Vec<BookSummaryRow> = books::table
            .filter(books::id.eq_any(raw_ids))
            .select(BookSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_summary).collect()
    }

    async fn list(&self) -> Result<Vec<BookSummary>, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<BookSummaryRow> = books::table
            .order(books::id.asc())
            .select(BookSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_summary).collect()
    }

    async fn save(&self, book: &Book) -> Result<(), BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let scores = book.scores().encode();
        let update = BookUpdate {
            name: book.name().as_ref(),
            scores: &scores,
        };

        let updated = diesel::update(books::table.find(book.id().get()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if updated == 0 {
            return Err(BookPersistenceError::query(format!(
                "book {} does not exist",
                book.id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Row mapping coverage.
    use super::*;
    use rstest::rstest;

    fn row(scores: Option<&str>) -> BookRow {
        BookRow {
            id: 2,
            name: "Dune".to_owned(),
            scores: scores.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(Some("[8,6]"), &[8.0, 6.0])]
    #[case(Some("8,6"), &[8.0, 6.0])]
    #[case(Some("8,six"), &[])]
    #[case(Some(""), &[])]
    #[case(None, &[])]
    fn row_to_book_decodes_both_legacy_formats(
        #[case] scores: Option<&str>,
        #[case] expected: &[f64],
    ) {
        let book = row_to_book(row(scores)).expect("valid row");
        assert_eq!(book.scores().as_slice(), expected);
        assert_eq!(book.id(), BookId::new(2));
    }

    #[rstest]
    fn overlong_stored_name_is_a_query_error() {
        let summary = BookSummaryRow {
            id: 9,
            name: "x".repeat(256),
        };
        let err = row_to_summary(summary).expect_err("invalid name");
        assert!(err.to_string().contains("stored name for book 9"));
    }
}
