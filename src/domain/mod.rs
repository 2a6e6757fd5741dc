//! Domain layer - Core business entities and logic
//!
//! Records, value objects and the versioning contract shared by
//! every mutable resource. No infrastructure dependencies.

mod versioned;

pub mod billing;
pub mod credential;
pub mod customer;
pub mod payroll;
pub mod permission;
pub mod role;
pub mod token;
pub mod user;

pub(crate) use versioned::impl_versioned;
pub use versioned::{Patch, Versioned};

pub use billing::{Billing, BillingPatch, NewBilling};
pub use credential::Credential;
pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use payroll::{NewPayroll, Payroll, PayrollPatch};
pub use permission::Permissions;
pub use role::Role;
pub use token::{hash_plaintext, AuthenticationToken, AuthenticationTokenResponse, Token};
pub use user::{NewUser, User, UserPatch, UserResponse};
