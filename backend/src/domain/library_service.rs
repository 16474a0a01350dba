//! Library domain service.
//!
//! Implements every driving port on top of the user and book repositories.
//! Lending transitions hold per-row locks across the whole
//! load, check, mutate and save cycle so concurrent requests on the same
//! rows serialise instead of racing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::lending::{self, LendingError};
use crate::domain::ports::{
    BookDetail, BookPersistenceError, BookRepository, BooksCommand, BooksQuery, LendingCommand,
    UserDetail, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::row_locks::RowLocks;
use crate::domain::{
    AverageRating, Book, BookId, BookName, BookSummary, Error, IdentifierSet, Score, User, UserId,
    UserName, UserSummary,
};

const LENDING_NOT_FOUND: &str = "user or book not found";

/// Library service implementing the user, book and lending driving ports.
pub struct LibraryService<U, B> {
    users: Arc<U>,
    books: Arc<B>,
    locks: Arc<RowLocks>,
}

impl<U, B> Clone for LibraryService<U, B> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            books: Arc::clone(&self.books),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<U, B> LibraryService<U, B> {
    /// Create a new service over the given repositories.
    pub fn new(users: Arc<U>, books: Arc<B>) -> Self {
        Self {
            users,
            books,
            locks: Arc::new(RowLocks::new()),
        }
    }
}

impl<U, B> LibraryService<U, B>
where
    U: UserRepository,
    B: BookRepository,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_book_error(error: BookPersistenceError) -> Error {
        match error {
            BookPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("book repository unavailable: {message}"))
            }
            BookPersistenceError::Query { message } => {
                Error::internal(format!("book repository error: {message}"))
            }
        }
    }

    fn map_lending_error(error: LendingError) -> Error {
        let message = error.to_string();
        match error {
            LendingError::AlreadyBorrowed { user_id, book_id } => Error::already_borrowed(message)
                .with_details(json!({ "userId": user_id, "bookId": book_id })),
            LendingError::NotBorrowed { user_id, book_id } => Error::not_borrowed(message)
                .with_details(json!({ "userId": user_id, "bookId": book_id })),
        }
    }

    async fn load_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)
    }

    async fn load_book(&self, id: BookId) -> Result<Option<Book>, Error> {
        self.books
            .find_by_id(id)
            .await
            .map_err(Self::map_book_error)
    }

    /// Load both rows of a lending transition, collapsing either absence
    /// into one not-found error.
    async fn load_pair(&self, user_id: UserId, book_id: BookId) -> Result<(User, Book), Error> {
        let user = self.load_user(user_id).await?;
        let book = self.load_book(book_id).await?;
        match (user, book) {
            (Some(user), Some(book)) => Ok((user, book)),
            (user, book) => {
                debug!(
                    %user_id,
                    %book_id,
                    user_found = user.is_some(),
                    book_found = book.is_some(),
                    "lending target missing"
                );
                Err(Error::not_found(LENDING_NOT_FOUND))
            }
        }
    }

    /// Resolve both holdings to titles with a single batch lookup.
    async fn resolve_holdings(
        &self,
        borrowed: &IdentifierSet,
        returned: &IdentifierSet,
    ) -> Result<(Vec<BookName>, Vec<BookName>), Error> {
        let mut wanted: Vec<BookId> = borrowed
            .as_slice()
            .iter()
            .chain(returned.as_slice())
            .copied()
            .collect();
        wanted.sort_unstable();
        wanted.dedup();
        if wanted.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let titles: HashMap<BookId, BookName> = self
            .books
            .find_by_ids(&wanted)
            .await
            .map_err(Self::map_book_error)?
            .into_iter()
            .map(|summary| (summary.id, summary.name))
            .collect();

        Ok((
            resolve_titles(borrowed, &titles),
            resolve_titles(returned, &titles),
        ))
    }
}

/// Titles for `ids` in set order; repeats collapse to the first occurrence
/// and unknown ids are skipped.
fn resolve_titles(ids: &IdentifierSet, titles: &HashMap<BookId, BookName>) -> Vec<BookName> {
    let mut seen = HashSet::new();
    ids.as_slice()
        .iter()
        .filter(|id| seen.insert(**id))
        .filter_map(|id| titles.get(id).cloned())
        .collect()
}

#[async_trait]
impl<U, B> UsersCommand for LibraryService<U, B>
where
    U: UserRepository,
    B: BookRepository,
{
    async fn create_user(&self, name: UserName) -> Result<UserSummary, Error> {
        let id = self
            .users
            .create(&name)
            .await
            .map_err(Self::map_user_error)?;
        Ok(UserSummary { id, name })
    }
}

#[async_trait]
impl<U, B> UsersQuery for LibraryService<U, B>
where
    U: UserRepository,
    B: BookRepository,
{
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        self.users.list().await.map_err(Self::map_user_error)
    }

    async fn get_user_detail(&self, id: UserId) -> Result<UserDetail, Error> {
        let user = self
            .load_user(id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        let (borrowed_books, returned_books) = self
            .resolve_holdings(user.borrowed_books(), user.returned_books())
            .await?;
        Ok(UserDetail {
            id: user.id(),
            name: user.name().clone(),
            borrowed_books,
            returned_books,
        })
    }
}

#[async_trait]
impl<U, B> BooksCommand for LibraryService<U, B>
where
    U: UserRepository,
    B: BookRepository,
{
    async fn create_book(&self, name: BookName) -> Result<BookSummary, Error> {
        let id = self
            .books
            .create(&name)
            .await
            .map_err(Self::map_book_error)?;
        Ok(BookSummary { id, name })
    }
}

#[async_trait]
impl<U, B> BooksQuery for LibraryService<U, B>
where
    U: UserRepository,
    B: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<BookSummary>, Error> {
        self.books.list().await.map_err(Self::map_book_error)
    }

    async fn get_book_detail(&self, id: BookId) -> Result<BookDetail, Error> {
        let book = self
            .load_book(id)
            .await?
            .ok_or_else(|| Error::not_found("book not found"))?;
        Ok(BookDetail {
            name: book.name().clone(),
            average_rating: AverageRating::of(book.scores().as_slice()),
        })
    }
}

#[async_trait]
impl<U, B> LendingCommand for LibraryService<U, B>
where
    U: UserRepository,
    B: BookRepository,
{
    async fn borrow(&self, user_id: UserId, book_id: BookId) -> Result<(), Error> {
        let _user_guard = self.locks.lock_user(user_id).await;

        let (mut user, _book) = self.load_pair(user_id, book_id).await?;
        lending::borrow(&mut user, book_id).map_err(Self::map_lending_error)?;
        self.users.save(&user).await.map_err(Self::map_user_error)
    }

    async fn return_book(
        &self,
        user_id: UserId,
        book_id: BookId,
        score: Option<Score>,
    ) -> Result<(), Error> {
        let _user_guard = self.locks.lock_user(user_id).await;
        let _book_guard = self.locks.lock_book(book_id).await;

        let (mut user, mut book) = self.load_pair(user_id, book_id).await?;
        let outcome =
            lending::return_book(&mut user, &mut book, score).map_err(Self::map_lending_error)?;

        self.users.save(&user).await.map_err(Self::map_user_error)?;
        if outcome.score_recorded {
            self.books.save(&book).await.map_err(Self::map_book_error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "library_service_tests.rs"]
mod tests;
