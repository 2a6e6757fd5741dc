//! Billing handlers. Reads require `view_billing`, writes `manage_billing`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{Authorized, ManageBilling, ValidatedJson, ViewBilling};
use crate::api::AppState;
use crate::domain::{Billing, BillingPatch, NewBilling};
use crate::errors::AppResult;
use crate::types::{MessageResponse, Paginated, PaginatedBilling, PaginationParams};

pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_billing).post(create_billing))
        .route(
            "/:id",
            get(get_billing).patch(update_billing).delete(delete_billing),
        )
}

#[utoipa::path(
    get,
    path = "/v1/billing",
    tag = "Billing",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of billing entries", body = PaginatedBilling),
        (status = 403, description = "Requires view_billing")
    )
)]
pub async fn list_billing(
    _auth: Authorized<ViewBilling>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Billing>>> {
    let (entries, total) = state.services.billing.list(&params).await?;
    Ok(Json(Paginated::new(entries, &params, total)))
}

#[utoipa::path(
    post,
    path = "/v1/billing",
    tag = "Billing",
    security(("bearer_auth" = [])),
    request_body = NewBilling,
    responses(
        (status = 201, description = "Billing entry created", body = Billing),
        (status = 403, description = "Requires manage_billing"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_billing(
    _auth: Authorized<ManageBilling>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewBilling>,
) -> AppResult<(StatusCode, Json<Billing>)> {
    let entry = state.services.billing.create(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/v1/billing/{id}",
    tag = "Billing",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Billing entry ID")),
    responses(
        (status = 200, description = "Billing", body = Billing),
        (status = 404, description = "Billing entry not found")
    )
)]
pub async fn get_billing(
    _auth: Authorized<ViewBilling>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Billing>> {
    Ok(Json(state.services.billing.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/v1/billing/{id}",
    tag = "Billing",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Billing entry ID")),
    request_body = BillingPatch,
    responses(
        (status = 200, description = "Updated billing entry", body = Billing),
        (status = 404, description = "Billing entry not found"),
        (status = 409, description = "Edit conflict")
    )
)]
pub async fn update_billing(
    _auth: Authorized<ManageBilling>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<BillingPatch>,
) -> AppResult<Json<Billing>> {
    Ok(Json(state.services.billing.update(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/v1/billing/{id}",
    tag = "Billing",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Billing entry ID")),
    responses(
        (status = 200, description = "Billing entry deleted", body = MessageResponse),
        (status = 404, description = "Billing entry not found")
    )
)]
pub async fn delete_billing(
    _auth: Authorized<ManageBilling>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.billing.delete(id).await?;
    Ok(Json(MessageResponse::new("billing entry successfully deleted")))
}
