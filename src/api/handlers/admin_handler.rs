//! Administrator bootstrap.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedInput;
use crate::api::AppState;
use crate::config::{MAX_PASSWORD_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::AdminRegistration;

/// Administrator registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdminRequest {
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name is required"))]
    #[schema(example = "Alex Admin")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        max = MAX_PASSWORD_LENGTH,
        message = "Password must be between 8 and 72 characters"
    ))]
    pub password: String,
    /// Must equal the server's ADMIN_REGISTRATION_KEY
    pub secret_key: String,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/register", post(register_admin))
}

/// Register an Administrator using the bootstrap secret
#[utoipa::path(
    post,
    path = "/admin/register",
    tag = "Administration",
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Administrator created", body = UserResponse),
        (status = 403, description = "Secret key rejected"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_admin(
    State(state): State<AppState>,
    ValidatedInput(payload): ValidatedInput<RegisterAdminRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .auth
        .register_admin(AdminRegistration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            secret_key: payload.secret_key,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
