//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{impl_versioned, Credential, Patch, Role};

/// Staff member with a login credential.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub credential: Credential,
    pub version: i32,
}

impl_versioned!(User);

/// Data for inserting a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub credential: Credential,
}

/// Partial user update. A present `credential` replaces the stored hash.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub credential: Option<Credential>,
}

impl UserPatch {
    /// True when applying this patch changes the login password.
    pub fn changes_credential(&self) -> bool {
        self.credential.is_some()
    }
}

impl Patch<User> for UserPatch {
    fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(credential) = self.credential {
            user.credential = credential;
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// User display name
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Staff role
    pub role: Role,
    /// Current version stamp
    #[schema(example = 1)]
    pub version: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            name: user.name,
            email: user.email,
            role: user.role,
            version: user.version,
        }
    }
}
