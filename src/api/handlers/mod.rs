//! HTTP request handlers.

pub mod admin_handler;
pub mod billing_handler;
pub mod customer_handler;
pub mod payroll_handler;
pub mod token_handler;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use billing_handler::billing_routes;
pub use customer_handler::customer_routes;
pub use payroll_handler::payroll_routes;
pub use token_handler::token_routes;
pub use user_handler::user_routes;
