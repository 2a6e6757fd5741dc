//! Payroll repository.

use async_trait::async_trait;
use std::sync::Arc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::base::{RecordRepository, VersionedRepository};
use super::entities::payroll::{self, ActiveModel, Entity as PayrollEntity};
use crate::domain::{NewPayroll, Payroll};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

pub struct PayrollStore {
    db: Arc<DatabaseConnection>,
}

impl PayrollStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VersionedRepository<Payroll> for PayrollStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Payroll>> {
        let model = PayrollEntity::find_by_id(id).one(&*self.db).await?;
        Ok(model.map(Payroll::from))
    }

    async fn update_if_version(&self, entry: &Payroll) -> AppResult<Option<i32>> {
        let updated = PayrollEntity::update_many()
            .col_expr(payroll::Column::EmployeeId, Expr::value(entry.employee_id))
            .col_expr(payroll::Column::Amount, Expr::value(entry.amount))
            .col_expr(payroll::Column::Date, Expr::value(entry.date))
            .col_expr(
                payroll::Column::Version,
                Expr::col(payroll::Column::Version).add(1),
            )
            .filter(payroll::Column::Id.eq(entry.id))
            .filter(payroll::Column::Version.eq(entry.version))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Payroll entry"))?;

        Ok(updated.into_iter().next().map(|model| model.version))
    }
}

#[async_trait]
impl RecordRepository<Payroll, NewPayroll> for PayrollStore {
    async fn insert(&self, new: NewPayroll) -> AppResult<Payroll> {
        let active_model = ActiveModel {
            employee_id: Set(new.employee_id),
            amount: Set(new.amount),
            date: Set(new.date),
            version: Set(1),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Payroll entry"))?;
        Ok(Payroll::from(model))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Payroll>, u64)> {
        let paginator = PayrollEntity::find()
            .order_by_asc(payroll::Column::Id)
            .paginate(&*self.db, params.limit());
        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(params.page_index()).await?;

        Ok((entries.into_iter().map(Payroll::from).collect(), total))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = PayrollEntity::delete_by_id(id).exec(&*self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}
