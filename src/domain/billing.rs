//! Billing entries charged to customers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{impl_versioned, Patch};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Billing {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 2)]
    pub customer_id: i64,
    #[schema(example = 199.99)]
    pub amount: f64,
    pub date: NaiveDate,
    #[schema(example = 1)]
    pub version: i32,
}

impl_versioned!(Billing);

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewBilling {
    pub customer_id: i64,
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BillingPatch {
    pub customer_id: Option<i64>,
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl Patch<Billing> for BillingPatch {
    fn apply_to(self, billing: &mut Billing) {
        if let Some(customer_id) = self.customer_id {
            billing.customer_id = customer_id;
        }
        if let Some(amount) = self.amount {
            billing.amount = amount;
        }
        if let Some(date) = self.date {
            billing.date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_negative_amount_is_rejected() {
        let patch = BillingPatch {
            amount: Some(-1.0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(BillingPatch::default().validate().is_ok());
    }

    #[test]
    fn test_patch_keeps_version() {
        let mut billing = Billing {
            id: 5,
            customer_id: 2,
            amount: 10.0,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            version: 4,
        };
        BillingPatch {
            amount: Some(12.5),
            ..Default::default()
        }
        .apply_to(&mut billing);

        assert_eq!(billing.amount, 12.5);
        assert_eq!(billing.customer_id, 2);
        assert_eq!(billing.version, 4);
    }
}
