//! Opaque bearer tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::config::TOKEN_ENTROPY_BYTES;
use crate::errors::{AppError, AppResult};

/// A freshly issued token.
///
/// `plaintext` is the only copy of the secret and is handed to the caller once;
/// the store keeps `hash`.
#[derive(Clone)]
pub struct Token {
    pub plaintext: String,
    pub hash: Vec<u8>,
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
    pub scope: String,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("plaintext", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish()
    }
}

impl Token {
    /// Generate a random token for `user_id` that expires `ttl` from now.
    ///
    /// # Errors
    /// Internal error when the OS random source fails.
    pub fn generate(user_id: i64, ttl: Duration, scope: &str) -> AppResult<Self> {
        let mut secret = [0u8; TOKEN_ENTROPY_BYTES];
        OsRng
            .try_fill_bytes(&mut secret)
            .map_err(|e| AppError::internal(format!("Random source failed: {}", e)))?;

        let plaintext = URL_SAFE_NO_PAD.encode(secret);
        let hash = hash_plaintext(&plaintext);

        Ok(Self {
            plaintext,
            hash,
            user_id,
            expiry: Utc::now() + ttl,
            scope: scope.to_string(),
        })
    }

    /// Response body half that may leave the server.
    pub fn to_response(&self) -> AuthenticationToken {
        AuthenticationToken {
            token: self.plaintext.clone(),
            expiry: self.expiry,
        }
    }
}

/// SHA-256 digest of a presented token, as stored in `tokens.hash`.
pub fn hash_plaintext(plaintext: &str) -> Vec<u8> {
    Sha256::digest(plaintext.as_bytes()).to_vec()
}

/// Token as returned to the client.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthenticationToken {
    /// Opaque bearer token
    #[schema(example = "Q2hhbmdlTWVQbGVhc2VUaGlzSXNOb3RBUmVhbFRva2Vu")]
    pub token: String,
    /// Expiry timestamp (RFC 3339)
    pub expiry: DateTime<Utc>,
}

/// Envelope for `POST /tokens/authentication`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthenticationTokenResponse {
    pub authentication_token: AuthenticationToken,
}
