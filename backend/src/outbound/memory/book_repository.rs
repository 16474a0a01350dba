//! In-memory [`BookRepository`] adapter.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{BookPersistenceError, BookRepository};
use crate::domain::{Book, BookId, BookName, BookSummary, ScoreLedger};

#[derive(Debug, Clone)]
struct StoredBook {
    name: String,
    scores: Option<String>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, StoredBook>,
}

/// Books held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    table: Mutex<Table>,
}

impl InMemoryBookRepository {
    /// An empty repository; the first book receives id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row with a raw score ledger, bypassing the codec.
    pub fn insert_raw(&self, id: BookId, name: &str, scores: Option<&str>) {
        let mut table = self.lock();
        table.last_id = table.last_id.max(id.get());
        table.rows.insert(
            id.get(),
            StoredBook {
                name: name.to_owned(),
                scores: scores.map(str::to_owned),
            },
        );
    }

    /// Raw score ledger text as currently stored.
    pub fn raw_scores(&self, id: BookId) -> Option<Option<String>> {
        self.lock().rows.get(&id.get()).map(|row| row.scores.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn decode_name(id: i32, raw: &str) -> Result<BookName, BookPersistenceError> {
    BookName::new(raw)
        .map_err(|err| BookPersistenceError::query(format!("stored name for book {id}: {err}")))
}

fn row_to_summary(id: i32, row: &StoredBook) -> Result<BookSummary, BookPersistenceError> {
    Ok(BookSummary {
        id: BookId::new(id),
        name: decode_name(id, &row.name)?,
    })
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, name: &BookName) -> Result<BookId, BookPersistenceError> {
        let mut table = self.lock();
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| BookPersistenceError::query("book id sequence exhausted"))?;
        table.last_id = id;
        table.rows.insert(
            id,
            StoredBook {
                name: name.as_ref().to_owned(),
                scores: Some(ScoreLedger::default().encode()),
            },
        );
        Ok(BookId::new(id))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookPersistenceError> {
        let table = self.lock();
        let Some(row) = table.rows.get(&id.get()) else {
            return Ok(None);
        };
        Ok(Some(Book::from_parts(
            id,
            decode_name(id.get(), &row.name)?,
            ScoreLedger::decode(row.scores.as_deref()),
        )))
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<BookSummary>, BookPersistenceError> {
        let table = self.lock();
        ids.iter()
            .filter_map(|id| table.rows.get(&id.get()).map(|row| (id.get(), row)))
            .map(|(id, row)| row_to_summary(id, row))
            .collect()
    }

    async fn list(&self) -> Result<Vec<BookSummary>, BookPersistenceError> {
        self.lock()
            .rows
            .iter()
            .map(|(id, row)| row_to_summary(*id, row))
            .collect()
    }

    async fn save(&self, book: &Book) -> Result<(), BookPersistenceError> {
        let mut table = self.lock();
        let row = table.rows.get_mut(&book.id().get()).ok_or_else(|| {
            BookPersistenceError::query(format!("book {} does not exist", book.id()))
        })?;
        row.name = book.name().as_ref().to_owned();
        row.scores = Some(book.scores().encode());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Score;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryBookRepository {
        InMemoryBookRepository::new()
    }

    fn name(raw: &str) -> BookName {
        BookName::new(raw).expect("valid name")
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_ids_omits_unknown_ids(repo: InMemoryBookRepository) {
        let dune = repo.create(&name("Dune")).await.expect("create");
        let emma = repo.create(&name("Emma")).await.expect("create");

        let found = repo
            .find_by_ids(&[emma, BookId::new(404), dune])
            .await
            .expect("lookup");

        let mut ids: Vec<_> = found.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![dune, emma]);
    }

    #[rstest]
    #[tokio::test]
    async fn save_writes_comma_joined_scores(repo: InMemoryBookRepository) {
        let id = repo.create(&name("Dune")).await.expect("create");
        let mut book = repo.find_by_id(id).await.expect("find").expect("exists");
        book.record_score(Score::new(8.0).expect("valid"));
        book.record_score(Score::new(6.5).expect("valid"));

        repo.save(&book).await.expect("save");

        assert_eq!(repo.raw_scores(id), Some(Some("8,6.5".to_owned())));
    }

    #[rstest]
    #[case(Some("[9,7]"), &[9.0, 7.0])]
    #[case(Some("9,7"), &[9.0, 7.0])]
    #[case(Some("9,seven"), &[])]
    #[case(None, &[])]
    #[tokio::test]
    async fn stored_ledgers_decode_fail_soft(
        repo: InMemoryBookRepository,
        #[case] stored: Option<&str>,
        #[case] expected: &[f64],
    ) {
        repo.insert_raw(BookId::new(3), "Legacy", stored);

        let book = repo
            .find_by_id(BookId::new(3))
            .await
            .expect("find")
            .expect("exists");

        assert_eq!(book.scores().as_slice(), expected);
    }
}
