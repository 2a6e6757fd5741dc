//! Staff account handlers. Every route requires `manage_employee`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Authorized, ManageEmployee, ValidatedJson};
use crate::api::AppState;
use crate::config::{MAX_PASSWORD_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::domain::{Role, UserResponse};
use crate::errors::AppResult;
use crate::services::{CreateUser, UpdateUser};
use crate::types::{MessageResponse, Paginated, PaginatedUsers, PaginationParams};

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        max = MAX_PASSWORD_LENGTH,
        message = "Password must be between 8 and 72 characters"
    ))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    pub role: Role,
}

/// User update request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New password; revokes the user's existing tokens
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        max = MAX_PASSWORD_LENGTH,
        message = "Password must be between 8 and 72 characters"
    ))]
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// List users
#[utoipa::path(
    get,
    path = "/v1/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsers),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires manage_employee")
    )
)]
pub async fn list_users(
    _auth: Authorized<ManageEmployee>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let (users, total) = state.services.users.list_users(&params).await?;
    Ok(Json(
        Paginated::new(users, &params, total).map(UserResponse::from),
    ))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/v1/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 403, description = "Requires manage_employee"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    _auth: Authorized<ManageEmployee>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .users
        .create_user(CreateUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 403, description = "Requires manage_employee"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    _auth: Authorized<ManageEmployee>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update a user
#[utoipa::path(
    patch,
    path = "/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Edit conflict or duplicate email"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    Authorized { user: actor, .. }: Authorized<ManageEmployee>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    tracing::debug!(actor = actor.id, user_id = id, "Updating user");

    let user = state
        .services
        .users
        .update_user(
            id,
            UpdateUser {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                role: payload.role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    _auth: Authorized<ManageEmployee>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.delete_user(id).await?;
    Ok(Json(MessageResponse::new("user successfully deleted")))
}
