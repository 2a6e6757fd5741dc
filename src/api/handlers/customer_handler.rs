//! Customer handlers. Every route requires `manage_customers`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{Authorized, ManageCustomers, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Customer, CustomerPatch, NewCustomer};
use crate::errors::AppResult;
use crate::types::{MessageResponse, Paginated, PaginatedCustomers, PaginationParams};

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).patch(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    get,
    path = "/v1/customer",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of customers", body = PaginatedCustomers),
        (status = 403, description = "Requires manage_customers")
    )
)]
pub async fn list_customers(
    _auth: Authorized<ManageCustomers>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Customer>>> {
    let (customers, total) = state.services.customers.list(&params).await?;
    Ok(Json(Paginated::new(customers, &params, total)))
}

#[utoipa::path(
    post,
    path = "/v1/customer",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = NewCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_customer(
    _auth: Authorized<ManageCustomers>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state.services.customers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/v1/customer/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    _auth: Authorized<ManageCustomers>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.services.customers.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/v1/customer/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = CustomerPatch,
    responses(
        (status = 200, description = "Updated customer", body = Customer),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Edit conflict")
    )
)]
pub async fn update_customer(
    _auth: Authorized<ManageCustomers>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<CustomerPatch>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.services.customers.update(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/v1/customer/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted", body = MessageResponse),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    _auth: Authorized<ManageCustomers>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.customers.delete(id).await?;
    Ok(Json(MessageResponse::new("customer successfully deleted")))
}
