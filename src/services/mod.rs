//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) and
//! receive repository handles from the store context.

mod auth_service;
pub mod concurrency;
pub mod container;
mod credentials;
mod gate;
mod permission_service;
mod record_service;
mod token_service;
mod user_service;

pub use container::Services;

pub use auth_service::{AdminRegistration, AuthService, Authenticator};
pub use gate::AuthorizationGate;
pub use permission_service::{PermissionResolver, PermissionService};
pub use record_service::{
    BillingService, CustomerService, PayrollService, RecordManager, RecordService,
};
pub use token_service::{TokenManager, TokenService};
pub use user_service::{CreateUser, UpdateUser, UserManager, UserService};

#[cfg(test)]
pub use permission_service::MockPermissionService;
#[cfg(test)]
pub use token_service::MockTokenService;
