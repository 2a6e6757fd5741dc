//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{impl_versioned, Patch};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Customer {
    #[schema(example = 1)]
    pub id: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[schema(example = "Acme Ltd")]
    pub name: String,
    #[schema(example = "billing@acme.example")]
    pub email: String,
    #[schema(example = "+44 20 7946 0000")]
    pub phone: String,
    #[schema(example = "1 Market Street")]
    pub address: String,
    #[schema(example = 1)]
    pub version: i32,
}

impl_versioned!(Customer);

/// Customer creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewCustomer {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Acme Ltd")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "billing@acme.example")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Customer update payload; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CustomerPatch {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Patch<Customer> for CustomerPatch {
    fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
    }
}
