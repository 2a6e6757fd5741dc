//! Authorization gate.
//!
//! Turns a presented bearer token and a required permission code into an
//! admitted [`User`] or a rejection, before any handler logic runs. Both
//! lookups are read-only and bounded by the configured query timeout; a
//! timeout is treated as an internal failure and denies the request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SCOPE_AUTHENTICATION;
use crate::domain::{Permissions, User};
use crate::errors::{AppError, AppResult};

use super::{PermissionService, TokenService};

#[derive(Clone)]
pub struct AuthorizationGate {
    tokens: Arc<dyn TokenService>,
    permissions: Arc<dyn PermissionService>,
    query_timeout: Duration,
}

impl AuthorizationGate {
    pub fn new(
        tokens: Arc<dyn TokenService>,
        permissions: Arc<dyn PermissionService>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            tokens,
            permissions,
            query_timeout,
        }
    }

    /// Resolve the bearer token to its user, without a permission check.
    pub async fn authenticate(&self, bearer: Option<&str>) -> AppResult<User> {
        let token = bearer
            .filter(|t| !t.is_empty())
            .ok_or(AppError::AuthenticationRequired)?;

        let resolved = self
            .bounded("token lookup", self.tokens.resolve(SCOPE_AUTHENTICATION, token))
            .await;

        match resolved {
            Ok(user) => Ok(user),
            Err(AppError::RecordNotFound) => Err(AppError::InvalidOrExpiredToken),
            Err(e) => Err(internal(e)),
        }
    }

    /// Admit the bearer's user only if their role grants `required`.
    pub async fn authorize(&self, bearer: Option<&str>, required: &str) -> AppResult<User> {
        let user = self.authenticate(bearer).await?;

        let granted: Permissions = self
            .bounded(
                "permission lookup",
                self.permissions.permissions_for_role(user.role.as_str()),
            )
            .await
            .map_err(internal)?;

        if !granted.includes(required) {
            tracing::info!(user_id = user.id, role = %user.role, permission = required, "Permission denied");
            return Err(AppError::NotPermitted);
        }

        Ok(user)
    }

    async fn bounded<T>(
        &self,
        what: &'static str,
        lookup: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.query_timeout, lookup)
            .await
            .map_err(|_| AppError::internal(format!("{} timed out after {:?}", what, self.query_timeout)))?
    }
}

/// Every non-auth failure leaves the gate as an opaque internal error.
fn internal(err: AppError) -> AppError {
    if err.is_internal() {
        err
    } else {
        AppError::internal(err.to_string())
    }
}
