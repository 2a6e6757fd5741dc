//! User service - staff accounts under optimistic concurrency.

use async_trait::async_trait;
use std::sync::Arc;

use super::concurrency::{apply_update, settle};
use super::credentials::hash_password;
use crate::config::SCOPE_AUTHENTICATION;
use crate::domain::{NewUser, Patch, Role, User, UserPatch};
use crate::errors::{AppResult, OptionExt};
use crate::infra::DataStore;
use crate::types::PaginationParams;

/// New account as submitted; the password is still plaintext.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial account update as submitted.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)>;

    async fn get_user(&self, id: i64) -> AppResult<User>;

    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Versioned partial update. A password change revokes the user's sessions.
    async fn update_user(&self, id: i64, input: UpdateUser) -> AppResult<User>;

    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager<S: DataStore + ?Sized> {
    store: Arc<S>,
}

impl<S: DataStore + ?Sized> UserManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: DataStore + ?Sized + 'static> UserService for UserManager<S> {
    async fn list_users(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)> {
        self.store.users().list(params).await
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.store.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let credential = hash_password(input.password).await?;

        let user = self
            .store
            .users()
            .insert(NewUser {
                name: input.name,
                email: input.email,
                role: input.role,
                credential,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: i64, input: UpdateUser) -> AppResult<User> {
        // Hash before loading so no store round-trip waits on Argon2.
        let credential = match input.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let patch = UserPatch {
            name: input.name,
            email: input.email,
            role: input.role,
            credential,
        };
        let users = self.store.users();
        let user = if patch.changes_credential() {
            // New hash and session revocation land together or not at all.
            let mut user = users.find_by_id(id).await?.ok_or_not_found()?;
            patch.apply_to(&mut user);
            let written = users
                .update_revoking_tokens(&user, SCOPE_AUTHENTICATION)
                .await?;
            settle(&mut user, written)?;
            user
        } else {
            apply_update(&*users, id, patch).await?
        };

        tracing::info!(user_id = user.id, version = user.version, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.store.users().delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
