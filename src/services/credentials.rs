//! Credential hashing off the async executor.

use crate::domain::Credential;
use crate::errors::{AppError, AppResult};

/// Hash `plaintext` on the blocking pool.
pub(crate) async fn hash_password(plaintext: String) -> AppResult<Credential> {
    tokio::task::spawn_blocking(move || Credential::set(&plaintext))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
}

/// Verify `candidate` against `credential` on the blocking pool.
pub(crate) async fn verify_password(credential: Credential, candidate: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || credential.matches(&candidate))
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?
}
