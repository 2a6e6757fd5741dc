//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
mod billing_repository;
mod customer_repository;
pub(crate) mod entities;
mod payroll_repository;
mod permission_repository;
mod token_repository;
mod user_repository;

pub use base::{RecordRepository, VersionedRepository};
pub use billing_repository::BillingStore;
pub use customer_repository::CustomerStore;
pub use payroll_repository::PayrollStore;
pub use permission_repository::{PermissionRepository, PermissionStore};
pub use token_repository::{TokenRepository, TokenStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use permission_repository::MockPermissionRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;


/// Every statement a mock connection ran, transactions flattened in order.
#[cfg(test)]
pub(crate) fn logged_statements(
    db: std::sync::Arc<sea_orm::DatabaseConnection>,
) -> Vec<sea_orm::Statement> {
    std::sync::Arc::into_inner(db)
        .expect("connection still shared")
        .into_transaction_log()
        .iter()
        .flat_map(|t| t.statements().to_vec())
        .collect()
}
