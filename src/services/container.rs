//! Service container - builds every service from one store context.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, AuthorizationGate, BillingService, CustomerService,
    PayrollService, PermissionResolver, PermissionService, RecordManager, TokenManager,
    TokenService, UserManager, UserService,
};
use crate::config::Config;
use crate::domain::{BillingPatch, CustomerPatch, PayrollPatch};
use crate::infra::DataStore;

/// All application services, shared by request handlers.
#[derive(Clone)]
pub struct Services {
    pub tokens: Arc<dyn TokenService>,
    pub permissions: Arc<dyn PermissionService>,
    pub gate: AuthorizationGate,
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub customers: Arc<CustomerService>,
    pub payroll: Arc<PayrollService>,
    pub billing: Arc<BillingService>,
}

impl Services {
    /// Wire every service to `store`. Services borrow repositories; the store keeps ownership.
    pub fn from_store(store: Arc<dyn DataStore>, config: &Config) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(TokenManager::new(store.clone()));
        let permissions: Arc<dyn PermissionService> =
            Arc::new(PermissionResolver::new(store.clone()));
        let gate = AuthorizationGate::new(
            tokens.clone(),
            permissions.clone(),
            config.query_timeout(),
        );

        Self {
            auth: Arc::new(Authenticator::new(
                store.clone(),
                tokens.clone(),
                config.clone(),
            )),
            users: Arc::new(UserManager::new(store.clone())),
            customers: Arc::new(RecordManager::<_, _, CustomerPatch>::new(
                store.customers(),
                "customer",
            )),
            payroll: Arc::new(RecordManager::<_, _, PayrollPatch>::new(
                store.payroll(),
                "payroll",
            )),
            billing: Arc::new(RecordManager::<_, _, BillingPatch>::new(
                store.billing(),
                "billing",
            )),
            tokens,
            permissions,
            gate,
        }
    }
}
