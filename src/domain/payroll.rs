//! Payroll entries, one per payment to an employee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{impl_versioned, Patch};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Payroll {
    #[schema(example = 1)]
    pub id: i64,
    /// Owning user id
    #[schema(example = 4)]
    pub employee_id: i64,
    #[schema(example = 2500.0)]
    pub amount: f64,
    pub date: NaiveDate,
    #[schema(example = 1)]
    pub version: i32,
}

impl_versioned!(Payroll);

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewPayroll {
    pub employee_id: i64,
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PayrollPatch {
    pub employee_id: Option<i64>,
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl Patch<Payroll> for PayrollPatch {
    fn apply_to(self, payroll: &mut Payroll) {
        if let Some(employee_id) = self.employee_id {
            payroll.employee_id = employee_id;
        }
        if let Some(amount) = self.amount {
            payroll.amount = amount;
        }
        if let Some(date) = self.date {
            payroll.date = date;
        }
    }
}
