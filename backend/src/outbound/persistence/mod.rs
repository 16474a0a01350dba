//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types, running every text column through the domain codecs.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Async pooling**: `bb8` pools of `diesel-async` connections.
//!
//! # Example
//!
//! ```ignore
//! use library_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/library")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_book_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
