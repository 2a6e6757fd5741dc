//! Custom request extractors.

mod authorized;
mod validated_json;

pub use authorized::{
    Authenticated, Authorized, ManageBilling, ManageCustomers, ManageEmployee, ManagePayroll,
    RequiredPermission, ViewBilling, ViewPayroll,
};
pub use validated_json::{ValidatedInput, ValidatedJson};
