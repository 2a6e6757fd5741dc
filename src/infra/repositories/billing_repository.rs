//! Billing repository.

use async_trait::async_trait;
use std::sync::Arc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::base::{RecordRepository, VersionedRepository};
use super::entities::billing::{self, ActiveModel, Entity as BillingEntity};
use crate::domain::{Billing, NewBilling};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

pub struct BillingStore {
    db: Arc<DatabaseConnection>,
}

impl BillingStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VersionedRepository<Billing> for BillingStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Billing>> {
        let model = BillingEntity::find_by_id(id).one(&*self.db).await?;
        Ok(model.map(Billing::from))
    }

    async fn update_if_version(&self, entry: &Billing) -> AppResult<Option<i32>> {
        let updated = BillingEntity::update_many()
            .col_expr(billing::Column::CustomerId, Expr::value(entry.customer_id))
            .col_expr(billing::Column::Amount, Expr::value(entry.amount))
            .col_expr(billing::Column::Date, Expr::value(entry.date))
            .col_expr(
                billing::Column::Version,
                Expr::col(billing::Column::Version).add(1),
            )
            .filter(billing::Column::Id.eq(entry.id))
            .filter(billing::Column::Version.eq(entry.version))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Billing entry"))?;

        Ok(updated.into_iter().next().map(|model| model.version))
    }
}

#[async_trait]
impl RecordRepository<Billing, NewBilling> for BillingStore {
    async fn insert(&self, new: NewBilling) -> AppResult<Billing> {
        let active_model = ActiveModel {
            customer_id: Set(new.customer_id),
            amount: Set(new.amount),
            date: Set(new.date),
            version: Set(1),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Billing entry"))?;
        Ok(Billing::from(model))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Billing>, u64)> {
        let paginator = BillingEntity::find()
            .order_by_asc(billing::Column::Id)
            .paginate(&*self.db, params.limit());
        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(params.page_index()).await?;

        Ok((entries.into_iter().map(Billing::from).collect(), total))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = BillingEntity::delete_by_id(id).exec(&*self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use crate::infra::repositories::logged_statements;

    fn model(version: i32) -> billing::Model {
        billing::Model {
            id: 31,
            customer_id: 9,
            amount: 99.5,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            version,
        }
    }

    #[tokio::test]
    async fn test_update_is_guarded_on_seen_version() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(6)]])
            .into_connection();
        let store = BillingStore::new(Arc::new(db));

        let entry = Billing::from(model(5));
        assert_eq!(store.update_if_version(&entry).await.unwrap(), Some(6));

        let statements = logged_statements(store.db);
        assert_eq!(statements.len(), 1);
        let update = &statements[0];
        assert!(update.sql.starts_with(r#"UPDATE "billing""#));
        assert!(update.sql.contains(r#""customer_id" = $"#));
        assert!(update.sql.contains(r#""version" = "version" + $"#));
        assert!(update.sql.contains(r#""billing"."id" = $"#));
        assert!(update.sql.contains(r#""billing"."version" = $"#));
        assert!(update.sql.contains("RETURNING"));
        assert!(update.values.as_ref().unwrap().0.contains(&Value::Int(Some(5))));
    }
}
