//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod billing;
pub mod customer;
pub mod payroll;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod token;
pub mod user;
