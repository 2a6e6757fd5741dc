//! Authorization extractors.
//!
//! Handlers take the admitted user as a parameter; a request that fails the
//! gate never reaches the handler body, so there is no "missing user" state
//! for handlers to check.

use std::marker::PhantomData;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::api::AppState;
use crate::config::{
    PERM_MANAGE_BILLING, PERM_MANAGE_CUSTOMERS, PERM_MANAGE_EMPLOYEE, PERM_MANAGE_PAYROLL,
    PERM_VIEW_BILLING, PERM_VIEW_PAYROLL,
};
use crate::domain::User;
use crate::errors::AppError;

/// Marker type naming the permission code a route requires.
pub trait RequiredPermission: Send + Sync + 'static {
    const CODE: &'static str;
}

macro_rules! permissions {
    ($($name:ident => $code:expr),+ $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $name;

            impl RequiredPermission for $name {
                const CODE: &'static str = $code;
            }
        )+
    };
}

permissions! {
    ManageEmployee => PERM_MANAGE_EMPLOYEE,
    ManageCustomers => PERM_MANAGE_CUSTOMERS,
    ViewBilling => PERM_VIEW_BILLING,
    ManageBilling => PERM_MANAGE_BILLING,
    ViewPayroll => PERM_VIEW_PAYROLL,
    ManagePayroll => PERM_MANAGE_PAYROLL,
}

/// A user whose role grants permission `P`.
pub struct Authorized<P: RequiredPermission> {
    pub user: User,
    _permission: PhantomData<fn() -> P>,
}

impl<P: RequiredPermission> std::fmt::Debug for Authorized<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("user_id", &self.user.id)
            .field("permission", &P::CODE)
            .finish()
    }
}

#[async_trait]
impl<P: RequiredPermission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer = bearer_token(parts, state).await?;
        let user = state
            .services
            .gate
            .authorize(bearer.as_deref(), P::CODE)
            .await?;

        Ok(Self {
            user,
            _permission: PhantomData,
        })
    }
}

/// Any user holding a valid authentication token.
#[derive(Debug)]
pub struct Authenticated(pub User);

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer = bearer_token(parts, state).await?;
        let user = state.services.gate.authenticate(bearer.as_deref()).await?;
        Ok(Self(user))
    }
}

/// Bearer credential from the `Authorization` header.
///
/// `None` when the header is absent; a header that is present but not a
/// Bearer credential is rejected as an invalid token.
async fn bearer_token(parts: &mut Parts, state: &AppState) -> Result<Option<String>, AppError> {
    match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
        Ok(TypedHeader(Authorization(bearer))) => Ok(Some(bearer.token().to_string())),
        Err(rejection) if rejection.is_missing() => Ok(None),
        Err(_) => Err(AppError::InvalidOrExpiredToken),
    }
}
