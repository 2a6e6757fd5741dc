//! User repository implementation.

use async_trait::async_trait;
use std::sync::Arc;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait, UpdateMany,
};

use super::base::{RecordRepository, VersionedRepository};
use super::entities::token;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

const DUPLICATE_EMAIL: &str = "A user with this email address";

/// User repository: the generic record operations plus lookup by email.
#[async_trait]
pub trait UserRepository: RecordRepository<User, NewUser> {
    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Guarded write of `user` (as [`VersionedRepository::update_if_version`])
    /// that also deletes every token of the user in `scope`, in one transaction.
    ///
    /// Tokens are only deleted when the guard matched; any failure leaves both
    /// tables as they were.
    async fn update_revoking_tokens(&self, user: &User, scope: &str) -> AppResult<Option<i32>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VersionedRepository<User> for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn update_if_version(&self, user: &User) -> AppResult<Option<i32>> {
        let updated = guarded_update(user)
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, DUPLICATE_EMAIL))?;

        Ok(updated.into_iter().next().map(|model| model.version))
    }
}

/// Every business column of `user`, bumping `version`, only where the stored
/// version is still the one `user` was read at.
fn guarded_update(user: &User) -> UpdateMany<UserEntity> {
    UserEntity::update_many()
        .col_expr(user::Column::Name, Expr::value(user.name.clone()))
        .col_expr(user::Column::Email, Expr::value(user.email.clone()))
        .col_expr(user::Column::Role, Expr::value(user.role.as_str()))
        .col_expr(
            user::Column::PasswordHash,
            Expr::value(user.credential.as_str().to_string()),
        )
        .col_expr(
            user::Column::Version,
            Expr::col(user::Column::Version).add(1),
        )
        .filter(user::Column::Id.eq(user.id))
        .filter(user::Column::Version.eq(user.version))
}

#[async_trait]
impl RecordRepository<User, NewUser> for UserStore {
    async fn insert(&self, new: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            created_at: Set(Utc::now()),
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.credential.into()),
            role: Set(new.role.to_string()),
            version: Set(1),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, DUPLICATE_EMAIL))?;
        User::try_from(model)
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .paginate(&*self.db, params.limit());
        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(params.page_index())
            .await?
            .into_iter()
            .map(User::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((users, total))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&*self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn update_revoking_tokens(&self, user: &User, scope: &str) -> AppResult<Option<i32>> {
        let update = guarded_update(user);
        let user_id = user.id;
        let scope = scope.to_string();

        let written = self
            .db
            .transaction::<_, Option<i32>, DbErr>(move |txn| {
                Box::pin(async move {
                    let Some(model) = update.exec_with_returning(txn).await?.into_iter().next()
                    else {
                        return Ok(None);
                    };

                    let revoked = token::Entity::delete_many()
                        .filter(token::Column::UserId.eq(user_id))
                        .filter(token::Column::Scope.eq(scope.as_str()))
                        .exec(txn)
                        .await?;

                    tracing::info!(
                        user_id,
                        revoked = revoked.rows_affected,
                        "Tokens revoked with update"
                    );
                    Ok(Some(model.version))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => {
                    AppError::from_write(e, DUPLICATE_EMAIL)
                }
            })?;

        Ok(written)
    }
}
