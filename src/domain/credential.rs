//! Credential value object - password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::{
    ARGON2_ITERATIONS, ARGON2_MEMORY_KIB, ARGON2_PARALLELISM, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Stored password credential (an Argon2id PHC string).
///
/// The plaintext never outlives [`Credential::set`]; only the encoded hash is kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Credential {
    /// Hash a plaintext password into a new credential.
    ///
    /// This is CPU-bound; async callers should run it on the blocking pool.
    ///
    /// # Errors
    /// Validation error when the password length is outside the accepted range.
    pub fn set(plaintext: &str) -> AppResult<Self> {
        let len = plaintext.chars().count() as u64;
        if len < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must not be more than {} characters",
                MAX_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from the store.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Encoded hash for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Check a candidate password against this credential.
    ///
    /// A wrong password is `Ok(false)`. `Err` means the stored hash itself is
    /// unusable (corrupt encoding, unknown algorithm).
    pub fn matches(&self, candidate: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&self.hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

        match Self::argon2()?.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Password verification failed: {}", e))),
        }
    }

    fn argon2() -> AppResult<Argon2<'static>> {
        let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
            .map_err(|e| AppError::internal(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl From<Credential> for String {
    fn from(credential: Credential) -> Self {
        credential.hash
    }
}
