//! Permission resolver - role name to granted permission codes.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Permissions;
use crate::errors::AppResult;
use crate::infra::DataStore;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Codes granted to `role`. A role without grants yields an empty set, not an error.
    async fn permissions_for_role(&self, role: &str) -> AppResult<Permissions>;
}

pub struct PermissionResolver<S: DataStore + ?Sized> {
    store: Arc<S>,
}

impl<S: DataStore + ?Sized> PermissionResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: DataStore + ?Sized + 'static> PermissionService for PermissionResolver<S> {
    async fn permissions_for_role(&self, role: &str) -> AppResult<Permissions> {
        let codes = self.store.permissions().all_for_role(role).await?;
        let granted: Permissions = codes.into_iter().collect();

        tracing::debug!(role, granted = granted.len(), "Permissions resolved");
        Ok(granted)
    }
}
