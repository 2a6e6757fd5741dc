//! Versioned record service shared by customers, payroll and billing.

use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

use super::concurrency::apply_update;
use crate::domain::{
    Billing, BillingPatch, Customer, CustomerPatch, NewBilling, NewCustomer, NewPayroll, Patch,
    Payroll, PayrollPatch, Versioned,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::RecordRepository;
use crate::types::PaginationParams;

/// List, read, create, patch and delete one kind of versioned record.
#[async_trait]
pub trait RecordService<T, N, P>: Send + Sync
where
    T: Versioned + Send + Sync + 'static,
    N: Send + 'static,
    P: Patch<T> + Send + 'static,
{
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<T>, u64)>;

    async fn get(&self, id: i64) -> AppResult<T>;

    async fn create(&self, new: N) -> AppResult<T>;

    /// Versioned partial update; `EditConflict` when another writer got there first.
    async fn update(&self, id: i64, patch: P) -> AppResult<T>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub type CustomerService = dyn RecordService<Customer, NewCustomer, CustomerPatch>;
pub type PayrollService = dyn RecordService<Payroll, NewPayroll, PayrollPatch>;
pub type BillingService = dyn RecordService<Billing, NewBilling, BillingPatch>;

/// Concrete implementation of RecordService over a record repository.
pub struct RecordManager<T, N, P>
where
    T: Versioned + Send + Sync + 'static,
    N: Send + 'static,
{
    repo: Arc<dyn RecordRepository<T, N>>,
    resource: &'static str,
    _patch: PhantomData<fn(P)>,
}

impl<T, N, P> RecordManager<T, N, P>
where
    T: Versioned + Send + Sync + 'static,
    N: Send + 'static,
{
    /// `resource` names the record kind in logs.
    pub fn new(repo: Arc<dyn RecordRepository<T, N>>, resource: &'static str) -> Self {
        Self {
            repo,
            resource,
            _patch: PhantomData,
        }
    }
}

#[async_trait]
impl<T, N, P> RecordService<T, N, P> for RecordManager<T, N, P>
where
    T: Versioned + Send + Sync + 'static,
    N: Send + 'static,
    P: Patch<T> + Send + 'static,
{
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<T>, u64)> {
        self.repo.list(params).await
    }

    async fn get(&self, id: i64) -> AppResult<T> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create(&self, new: N) -> AppResult<T> {
        let record = self.repo.insert(new).await?;
        tracing::info!(resource = self.resource, id = record.id(), "Record created");
        Ok(record)
    }

    async fn update(&self, id: i64, patch: P) -> AppResult<T> {
        let record = apply_update(&*self.repo, id, patch).await?;
        tracing::info!(
            resource = self.resource,
            id,
            version = record.version(),
            "Record updated"
        );
        Ok(record)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(resource = self.resource, id, "Record deleted");
        Ok(())
    }
}
