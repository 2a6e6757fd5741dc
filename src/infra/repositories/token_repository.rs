//! Token persistence. Rows are keyed by digest and never updated in place.

use async_trait::async_trait;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set};

use super::entities::{token, user};
use crate::domain::{Token, User};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist the digest, owner, expiry and scope of a new token.
    async fn insert(&self, token: &Token) -> AppResult<()>;

    /// Owner of the token with digest `hash` in `scope`, if it expires after `now`.
    async fn find_user(
        &self,
        hash: &[u8],
        scope: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    /// Delete every token of `user_id` in `scope`; returns the number removed.
    async fn delete_all_for_user(&self, scope: &str, user_id: i64) -> AppResult<u64>;
}

pub struct TokenStore {
    db: Arc<DatabaseConnection>,
}

impl TokenStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for TokenStore {
    async fn insert(&self, token: &Token) -> AppResult<()> {
        let active_model = token::ActiveModel {
            hash: Set(token.hash.clone()),
            user_id: Set(token.user_id),
            expiry: Set(token.expiry),
            scope: Set(token.scope.clone()),
        };

        token::Entity::insert(active_model)
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Token"))?;
        Ok(())
    }

    async fn find_user(
        &self,
        hash: &[u8],
        scope: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        user::Entity::find()
            .inner_join(token::Entity)
            .filter(token::Column::Hash.eq(hash.to_vec()))
            .filter(token::Column::Scope.eq(scope))
            .filter(token::Column::Expiry.gt(now))
            .one(&*self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn delete_all_for_user(&self, scope: &str, user_id: i64) -> AppResult<u64> {
        let result = token::Entity::delete_many()
            .filter(token::Column::UserId.eq(user_id))
            .filter(token::Column::Scope.eq(scope))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
