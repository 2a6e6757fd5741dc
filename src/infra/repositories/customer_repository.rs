//! Customer repository.

use async_trait::async_trait;
use std::sync::Arc;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::base::{RecordRepository, VersionedRepository};
use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::domain::{Customer, NewCustomer};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

pub struct CustomerStore {
    db: Arc<DatabaseConnection>,
}

impl CustomerStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VersionedRepository<Customer> for CustomerStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        let model = CustomerEntity::find_by_id(id).one(&*self.db).await?;
        Ok(model.map(Customer::from))
    }

    async fn update_if_version(&self, customer: &Customer) -> AppResult<Option<i32>> {
        let updated = CustomerEntity::update_many()
            .col_expr(customer::Column::Name, Expr::value(customer.name.clone()))
            .col_expr(customer::Column::Email, Expr::value(customer.email.clone()))
            .col_expr(customer::Column::Phone, Expr::value(customer.phone.clone()))
            .col_expr(
                customer::Column::Address,
                Expr::value(customer.address.clone()),
            )
            .col_expr(
                customer::Column::Version,
                Expr::col(customer::Column::Version).add(1),
            )
            .filter(customer::Column::Id.eq(customer.id))
            .filter(customer::Column::Version.eq(customer.version))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Customer"))?;

        Ok(updated.into_iter().next().map(|model| model.version))
    }
}

#[async_trait]
impl RecordRepository<Customer, NewCustomer> for CustomerStore {
    async fn insert(&self, new: NewCustomer) -> AppResult<Customer> {
        let active_model = ActiveModel {
            created_at: Set(Utc::now()),
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            address: Set(new.address),
            version: Set(1),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Customer"))?;
        Ok(Customer::from(model))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Customer>, u64)> {
        let paginator = CustomerEntity::find()
            .order_by_asc(customer::Column::Id)
            .paginate(&*self.db, params.limit());
        let total = paginator.num_items().await?;
        let customers = paginator.fetch_page(params.page_index()).await?;

        Ok((customers.into_iter().map(Customer::from).collect(), total))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = CustomerEntity::delete_by_id(id).exec(&*self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use crate::infra::repositories::logged_statements;

    fn model(version: i32) -> customer::Model {
        customer::Model {
            id: 9,
            created_at: Utc::now(),
            name: "Acme Ltd".to_string(),
            email: "billing@acme.example".to_string(),
            phone: String::new(),
            address: String::new(),
            version,
        }
    }

    #[tokio::test]
    async fn test_update_returns_bumped_version() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(4)]])
            .into_connection();
        let store = CustomerStore::new(Arc::new(db));

        let customer = Customer::from(model(3));
        assert_eq!(store.update_if_version(&customer).await.unwrap(), Some(4));

        let statements = logged_statements(store.db);
        let update = &statements[0];
        assert!(update.sql.starts_with(r#"UPDATE "customers""#));
        assert!(update.sql.contains(r#""version" = "version" + $"#));
        assert!(update.sql.contains(r#""customers"."id" = $"#));
        assert!(update.sql.contains(r#""customers"."version" = $"#));
        assert!(update.sql.contains("RETURNING"));
        assert!(update.values.as_ref().unwrap().0.contains(&Value::Int(Some(3))));
    }

    #[tokio::test]
    async fn test_update_guard_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<customer::Model>::new()])
            .into_connection();
        let store = CustomerStore::new(Arc::new(db));

        let customer = Customer::from(model(3));
        assert_eq!(store.update_if_version(&customer).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let store = CustomerStore::new(Arc::new(db));

        let err = store.delete(404).await.unwrap_err();
        assert!(matches!(err, AppError::RecordNotFound));
    }
}
