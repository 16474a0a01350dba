//! In-memory [`UserRepository`] adapter.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{IdentifierSet, User, UserId, UserName, UserSummary};

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    borrowed_books: Option<String>,
    returned_books: Option<String>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, StoredUser>,
}

/// Users held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    /// An empty repository; the first user receives id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row with raw holdings text, bypassing the codec.
    ///
    /// Mirrors rows written by older deployments. Later [`create`] calls
    /// keep issuing ids above every inserted id.
    ///
    /// [`create`]: UserRepository::create
    pub fn insert_raw(
        &self,
        id: UserId,
        name: &str,
        borrowed_books: Option<&str>,
        returned_books: Option<&str>,
    ) {
        let mut table = self.lock();
        table.last_id = table.last_id.max(id.get());
        table.rows.insert(
            id.get(),
            StoredUser {
                name: name.to_owned(),
                borrowed_books: borrowed_books.map(str::to_owned),
                returned_books: returned_books.map(str::to_owned),
            },
        );
    }

    /// Raw `(borrowed_books, returned_books)` text as currently stored.
    pub fn raw_holdings(&self, id: UserId) -> Option<(Option<String>, Option<String>)> {
        self.lock()
            .rows
            .get(&id.get())
            .map(|row| (row.borrowed_books.clone(), row.returned_books.clone()))
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn decode_name(id: i32, raw: &str) -> Result<UserName, UserPersistenceError> {
    UserName::new(raw)
        .map_err(|err| UserPersistenceError::query(format!("stored name for user {id}: {err}")))
}

fn row_to_user(id: i32, row: &StoredUser) -> Result<User, UserPersistenceError> {
    Ok(User::from_parts(
        UserId::new(id),
        decode_name(id, &row.name)?,
        IdentifierSet::decode_or_empty(row.borrowed_books.as_deref(), "borrowed_books"),
        IdentifierSet::decode_or_empty(row.returned_books.as_deref(), "returned_books"),
    ))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: &UserName) -> Result<UserId, UserPersistenceError> {
        let mut table = self.lock();
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        table.last_id = id;
        table.rows.insert(
            id,
            StoredUser {
                name: name.as_ref().to_owned(),
                borrowed_books: Some(IdentifierSet::new().encode()),
                returned_books: Some(IdentifierSet::new().encode()),
            },
        );
        Ok(UserId::new(id))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = self.lock();
        table
            .rows
            .get(&id.get())
            .map(|row| row_to_user(id.get(), row))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<UserSummary>, UserPersistenceError> {
        self.lock()
            .rows
            .iter()
            .map(|(id, row)| {
                Ok(UserSummary {
                    id: UserId::new(*id),
                    name: decode_name(*id, &row.name)?,
                })
            })
            .collect()
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut table = self.lock();
        let row = table.rows.get_mut(&user.id().get()).ok_or_else(|| {
            UserPersistenceError::query(format!("user {} does not exist", user.id()))
        })?;
        row.name = user.name().as_ref().to_owned();
        row.borrowed_books = Some(user.borrowed_books().encode());
        row.returned_books = Some(user.returned_books().encode());
        Ok(())
    }
}
