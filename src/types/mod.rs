//! Shared types used across handlers and repositories.

mod pagination;
mod response;

pub use pagination::{
    Paginated, PaginatedBilling, PaginatedCustomers, PaginatedPayroll, PaginatedUsers,
    PaginationMeta, PaginationParams,
};
pub use response::MessageResponse;
