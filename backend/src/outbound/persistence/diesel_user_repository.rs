//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Holdings are stored as codec text in nullable columns. Rows written by
//! older deployments may hold text the codec rejects; those degrade to empty
//! sets on read.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{IdentifierSet, User, UserId, UserName, UserSummary};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserSummaryRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

fn decode_name(id: i32, raw: String) -> Result<UserName, UserPersistenceError> {
    UserName::new(raw)
        .map_err(|err| UserPersistenceError::query(format!("stored name for user {id}: {err}")))
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let borrowed = IdentifierSet::decode_or_empty(row.borrowed_books.as_deref(), "borrowed_books");
    let returned = IdentifierSet::decode_or_empty(row.returned_books.as_deref(), "returned_books");
    Ok(User::from_parts(
        UserId::new(row.id),
        decode_name(row.id, row.name)?,
        borrowed,
        returned,
    ))
}

fn row_to_summary(row: UserSummaryRow) -> Result<UserSummary, UserPersistenceError> {
    Ok(UserSummary {
        id: UserId::new(row.id),
        name: decode_name(row.id, row.name)?,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, name: &UserName) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let empty = IdentifierSet::new().encode();
        let new_row = NewUserRow {
            name: name.as_ref(),
            borrowed_books: &empty,
            returned_books: &empty,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .returning(users::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(UserId::new)
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<UserSummary>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserSummaryRow> = users::table
            .order(users::id.asc())
            .select(UserSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_summary).collect()
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let borrowed = user.borrowed_books().encode();
        let returned = user.returned_books().encode();
        let update = UserUpdate {
            name: user.name().as_ref(),
            borrowed_books: &borrowed,
            returned_books: &returned,
        };

        let updated = diesel::update(users::table.find(user.id().get()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::query(format!(
                "user {} does not exist",
                user.id()
            )));
        }
        Ok(())
    }
}
