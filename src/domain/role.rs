//! Closed set of staff roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ACCOUNTANT, ROLE_ADMINISTRATOR, ROLE_HR, ROLE_SALES};
use crate::errors::AppError;

/// Staff role. Parsed once at the boundary; permission codes stay data-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Administrator,
    Sales,
    Accountant,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    /// Name as stored in `users.role` and `roles.name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => ROLE_ADMINISTRATOR,
            Role::Sales => ROLE_SALES,
            Role::Accountant => ROLE_ACCOUNTANT,
            Role::Hr => ROLE_HR,
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMINISTRATOR => Ok(Role::Administrator),
            ROLE_SALES => Ok(Role::Sales),
            ROLE_ACCOUNTANT => Ok(Role::Accountant),
            ROLE_HR => Ok(Role::Hr),
            other => Err(AppError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
