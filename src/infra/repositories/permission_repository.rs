//! Read-only access to the role/permission relation.

use async_trait::async_trait;
use std::sync::Arc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};

use super::entities::{permission, role, role_permission};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Permission codes granted to the role called `role`. Empty for an unknown role.
    async fn all_for_role(&self, role: &str) -> AppResult<Vec<String>>;
}

pub struct PermissionStore {
    db: Arc<DatabaseConnection>,
}

impl PermissionStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PermissionRepository for PermissionStore {
    async fn all_for_role(&self, role_name: &str) -> AppResult<Vec<String>> {
        let granted = permission::Entity::find()
            .join(
                JoinType::InnerJoin,
                permission::Relation::RolePermission.def(),
            )
            .join(JoinType::InnerJoin, role_permission::Relation::Role.def())
            .filter(role::Column::Name.eq(role_name))
            .all(&*self.db)
            .await?;

        Ok(granted.into_iter().map(|p| p.code).collect())
    }
}
