//! Per-row mutual exclusion for lending read-modify-write cycles.
//!
//! Each user and book row gets its own async mutex on first use. Callers
//! that need both rows take the user lock first, then the book lock.
//! Entries nobody holds or waits on are pruned on the next acquisition, so
//! the registry only ever tracks rows with in-flight transitions.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::{BookId, UserId};

/// Held lock on a single row. Released on drop.
pub type RowGuard = OwnedMutexGuard<()>;

#[derive(Debug)]
struct LockTable<K> {
    slots: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> Default for LockTable<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Copy + Eq + Hash> LockTable<K> {
    fn slot(&self, key: K) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
        Arc::clone(slots.entry(key).or_default())
    }

    async fn acquire(&self, key: K) -> RowGuard {
        self.slot(key).lock_owned().await
    }

    fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| Arc::strong_count(slot) > 1)
            .count()
    }
}

/// Registry of per-user and per-book locks.
#[derive(Debug, Default)]
pub struct RowLocks {
    users: LockTable<UserId>,
    books: LockTable<BookId>,
}

impl RowLocks {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a user row.
    pub async fn lock_user(&self, id: UserId) -> RowGuard {
        self.users.acquire(id).await
    }

    /// Wait for exclusive access to a book row. Take the user lock first
    /// when both are needed.
    pub async fn lock_book(&self, id: BookId) -> RowGuard {
        self.books.acquire(id).await
    }

    /// Number of rows currently locked or awaited.
    pub fn in_flight(&self) -> usize {
        self.users.tracked() + self.books.tracked()
    }
}
