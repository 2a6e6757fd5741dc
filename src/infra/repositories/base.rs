//! Repository traits shared by every versioned resource.
//!
//! Split the way callers use them: the update protocol only needs
//! [`VersionedRepository`], list/create/delete handlers need the full
//! [`RecordRepository`].

use async_trait::async_trait;

use crate::domain::Versioned;
use crate::errors::AppResult;
use crate::types::PaginationParams;

/// Load and conditionally write a versioned record.
#[async_trait]
pub trait VersionedRepository<T>: Send + Sync
where
    T: Versioned + Send + Sync + 'static,
{
    /// Find a record by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<T>>;

    /// Write every business field of `record` and bump its version by one,
    /// guarded by `version = record.version()`.
    ///
    /// Returns the stored version after the write, or `None` when the guard
    /// matched no row (the record changed or vanished since it was read).
    async fn update_if_version(&self, record: &T) -> AppResult<Option<i32>>;
}

/// Create, list and delete on top of the versioned read/write pair.
#[async_trait]
pub trait RecordRepository<T, N>: VersionedRepository<T>
where
    T: Versioned + Send + Sync + 'static,
    N: Send + 'static,
{
    /// Insert a new record at version 1.
    async fn insert(&self, new: N) -> AppResult<T>;

    /// One page of records ordered by id, with the total row count.
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<T>, u64)>;

    /// Delete by id. `RecordNotFound` when nothing was deleted.
    async fn delete(&self, id: i64) -> AppResult<()>;
}
