//! Authentication service - login, logout and administrator bootstrap.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use super::credentials::{hash_password, verify_password};
use super::TokenService;
use crate::config::{Config, SCOPE_AUTHENTICATION};
use crate::domain::{Credential, NewUser, Role, Token, User};
use crate::errors::{AppError, AppResult};
use crate::infra::DataStore;

/// Verified against when the email is unknown, so both failure paths do the same work.
static DUMMY_CREDENTIAL: Lazy<Option<Credential>> =
    Lazy::new(|| Credential::set("timing-equaliser-password").ok());

/// Administrator bootstrap payload, already validated by the handler.
#[derive(Debug, Clone)]
pub struct AdminRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub secret_key: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check email and password, then issue an authentication token.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    async fn login(&self, email: String, password: String) -> AppResult<Token>;

    /// Revoke every authentication token of `user`.
    async fn logout(&self, user: &User) -> AppResult<()>;

    /// Create an Administrator when the secret matches the configured key.
    async fn register_admin(&self, registration: AdminRegistration) -> AppResult<User>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator<S: DataStore + ?Sized> {
    store: Arc<S>,
    tokens: Arc<dyn TokenService>,
    config: Config,
}

impl<S: DataStore + ?Sized> Authenticator<S> {
    pub fn new(store: Arc<S>, tokens: Arc<dyn TokenService>, config: Config) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }

    fn admin_key_matches(&self, presented: &str) -> bool {
        match self.config.admin_registration_key() {
            Some(key) => bool::from(key.as_bytes().ct_eq(presented.as_bytes())),
            None => false,
        }
    }
}

#[async_trait]
impl<S: DataStore + ?Sized + 'static> AuthService for Authenticator<S> {
    async fn login(&self, email: String, password: String) -> AppResult<Token> {
        let user = self.store.users().find_by_email(&email).await?;

        let credential = match &user {
            Some(user) => user.credential.clone(),
            None => (*DUMMY_CREDENTIAL)
                .clone()
                .ok_or_else(|| AppError::internal("Dummy credential unavailable"))?,
        };
        let valid = verify_password(credential, password).await?;

        let user = match user {
            Some(user) if valid => user,
            _ => {
                tracing::info!("Login failed");
                return Err(AppError::InvalidCredentials);
            }
        };

        self.tokens
            .issue(user.id, self.config.token_ttl(), SCOPE_AUTHENTICATION)
            .await
    }

    async fn logout(&self, user: &User) -> AppResult<()> {
        self.tokens.revoke_all(SCOPE_AUTHENTICATION, user.id).await
    }

    async fn register_admin(&self, registration: AdminRegistration) -> AppResult<User> {
        if !self.admin_key_matches(&registration.secret_key) {
            tracing::warn!("Administrator registration rejected");
            return Err(AppError::NotPermitted);
        }

        let credential = hash_password(registration.password).await?;
        let user = self
            .store
            .users()
            .insert(NewUser {
                name: registration.name,
                email: registration.email,
                role: Role::Administrator,
                credential,
            })
            .await?;

        tracing::info!(user_id = user.id, "Administrator registered");
        Ok(user)
    }
}
