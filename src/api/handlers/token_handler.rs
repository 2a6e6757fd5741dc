//! Authentication token handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Authenticated, ValidatedInput};
use crate::api::AppState;
use crate::domain::AuthenticationTokenResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Login credentials (JSON or form-encoded)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Password must be provided"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create token routes
pub fn token_routes() -> Router<AppState> {
    Router::new().route(
        "/authentication",
        post(create_authentication_token).delete(revoke_authentication_tokens),
    )
}

/// Exchange email and password for an authentication token
#[utoipa::path(
    post,
    path = "/tokens/authentication",
    tag = "Authentication",
    request_body(content = LoginRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "Token issued", body = AuthenticationTokenResponse),
        (status = 401, description = "Invalid authentication credentials"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_authentication_token(
    State(state): State<AppState>,
    ValidatedInput(payload): ValidatedInput<LoginRequest>,
) -> AppResult<(StatusCode, Json<AuthenticationTokenResponse>)> {
    let token = state
        .services
        .auth
        .login(payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthenticationTokenResponse {
            authentication_token: token.to_response(),
        }),
    ))
}

/// Revoke every authentication token of the caller
#[utoipa::path(
    delete,
    path = "/tokens/authentication",
    tag = "Authentication",
    responses(
        (status = 200, description = "Tokens revoked", body = MessageResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn revoke_authentication_tokens(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.logout(&user).await?;
    Ok(Json(MessageResponse::new("authentication tokens revoked")))
}
