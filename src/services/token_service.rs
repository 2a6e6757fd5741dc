//! Token service - issues, resolves and revokes opaque bearer tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::{hash_plaintext, Token, User};
use crate::errors::{AppError, AppResult};
use crate::infra::DataStore;

#[cfg(test)]
use mockall::automock;

/// Token service trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Generate and persist a token for `user_id`. The returned plaintext is the only copy.
    async fn issue(&self, user_id: i64, ttl: Duration, scope: &str) -> AppResult<Token>;

    /// Resolve a presented token to its owner.
    ///
    /// Unknown, wrong-scope and expired tokens all fail with `RecordNotFound`.
    async fn resolve(&self, scope: &str, plaintext: &str) -> AppResult<User>;

    /// Delete every token of `user_id` in `scope`. Succeeds when there were none.
    async fn revoke_all(&self, scope: &str, user_id: i64) -> AppResult<()>;
}

/// Concrete implementation of TokenService backed by the store context.
pub struct TokenManager<S: DataStore + ?Sized> {
    store: Arc<S>,
}

impl<S: DataStore + ?Sized> TokenManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: DataStore + ?Sized + 'static> TokenService for TokenManager<S> {
    async fn issue(&self, user_id: i64, ttl: Duration, scope: &str) -> AppResult<Token> {
        let token = Token::generate(user_id, ttl, scope)?;
        self.store.tokens().insert(&token).await?;

        tracing::info!(user_id, scope, expiry = %token.expiry, "Token issued");
        Ok(token)
    }

    async fn resolve(&self, scope: &str, plaintext: &str) -> AppResult<User> {
        let hash = hash_plaintext(plaintext);

        self.store
            .tokens()
            .find_user(&hash, scope, Utc::now())
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    async fn revoke_all(&self, scope: &str, user_id: i64) -> AppResult<()> {
        let removed = self.store.tokens().delete_all_for_user(scope, user_id).await?;

        tracing::info!(user_id, scope, removed, "Tokens revoked");
        Ok(())
    }
}
