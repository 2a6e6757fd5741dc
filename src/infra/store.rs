//! Store context.
//!
//! `Persistence` owns the database handle and hands out repository
//! handles; components borrow those and never own the connection.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};

use super::repositories::{
    BillingStore, CustomerStore, PayrollStore, PermissionRepository, PermissionStore,
    RecordRepository, TokenRepository, TokenStore, UserRepository, UserStore,
};
use crate::domain::{Billing, Customer, NewBilling, NewCustomer, NewPayroll, Payroll};

pub type CustomerRepository = dyn RecordRepository<Customer, NewCustomer>;
pub type PayrollRepository = dyn RecordRepository<Payroll, NewPayroll>;
pub type BillingRepository = dyn RecordRepository<Billing, NewBilling>;

/// Access to every repository. Implemented by [`Persistence`] and by test doubles.
pub trait DataStore: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn tokens(&self) -> Arc<dyn TokenRepository>;
    fn permissions(&self) -> Arc<dyn PermissionRepository>;
    fn customers(&self) -> Arc<CustomerRepository>;
    fn payroll(&self) -> Arc<PayrollRepository>;
    fn billing(&self) -> Arc<BillingRepository>;
}

/// Database-backed store context
pub struct Persistence {
    db: Arc<DatabaseConnection>,
    users: Arc<UserStore>,
    tokens: Arc<TokenStore>,
    permissions: Arc<PermissionStore>,
    customers: Arc<CustomerStore>,
    payroll: Arc<PayrollStore>,
    billing: Arc<BillingStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            tokens: Arc::new(TokenStore::new(db.clone())),
            permissions: Arc::new(PermissionStore::new(db.clone())),
            customers: Arc::new(CustomerStore::new(db.clone())),
            payroll: Arc::new(PayrollStore::new(db.clone())),
            billing: Arc::new(BillingStore::new(db.clone())),
            db,
        }
    }

    /// Close the connection pool. Repository handles still alive fail afterwards.
    pub async fn close(&self) -> Result<(), DbErr> {
        self.db.close_by_ref().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}

impl DataStore for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenRepository> {
        self.tokens.clone()
    }

    fn permissions(&self) -> Arc<dyn PermissionRepository> {
        self.permissions.clone()
    }

    fn customers(&self) -> Arc<CustomerRepository> {
        self.customers.clone()
    }

    fn payroll(&self) -> Arc<PayrollRepository> {
        self.payroll.clone()
    }

    fn billing(&self) -> Arc<BillingRepository> {
        self.billing.clone()
    }
}
