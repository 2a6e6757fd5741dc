//! Optimistic concurrency update protocol.
//!
//! Every versioned resource is updated the same way: load, patch in memory,
//! then a single conditional write guarded by the version that was loaded.
//! The store's guarded write is the only serialization point; nothing here
//! holds a lock across the read and the write, and nothing retries.

use crate::domain::{Patch, Versioned};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::VersionedRepository;

/// Write `record` back if its stored version still equals `record.version()`.
///
/// On success `record` carries the new version. A guard miss is
/// `EditConflict` and leaves the stored row untouched.
pub async fn commit<T, R>(repo: &R, record: &mut T) -> AppResult<()>
where
    T: Versioned + Send + Sync + 'static,
    R: VersionedRepository<T> + ?Sized,
{
    let written = repo.update_if_version(record).await?;
    settle(record, written)
}

/// Apply the outcome of a guarded write to the in-memory record.
///
/// `written` is the version the store returned, `None` for a guard miss.
pub fn settle<T: Versioned>(record: &mut T, written: Option<i32>) -> AppResult<()> {
    let seen = record.version();

    match written {
        Some(version) => {
            record.set_version(version);
            tracing::debug!(id = record.id(), from = seen, to = version, "Record updated");
            Ok(())
        }
        None => {
            tracing::info!(id = record.id(), version = seen, "Edit conflict");
            Err(AppError::EditConflict)
        }
    }
}

/// Load record `id`, apply `patch`, and commit.
pub async fn apply_update<T, P, R>(repo: &R, id: i64, patch: P) -> AppResult<T>
where
    T: Versioned + Send + Sync + 'static,
    P: Patch<T>,
    R: VersionedRepository<T> + ?Sized,
{
    let mut record = repo.find_by_id(id).await?.ok_or_not_found()?;
    patch.apply_to(&mut record);
    commit(repo, &mut record).await?;
    Ok(record)
}
