//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the store
//! context that owns them.

pub mod db;
pub mod repositories;
pub mod store;

pub use db::{Database, Migrator};
pub use repositories::{
    BillingStore, CustomerStore, PayrollStore, PermissionRepository, PermissionStore,
    RecordRepository, TokenRepository, TokenStore, UserRepository, UserStore, VersionedRepository,
};
pub use store::{BillingRepository, CustomerRepository, DataStore, PayrollRepository, Persistence};
