//! Payroll handlers. Reads require `view_payroll`, writes `manage_payroll`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{Authorized, ManagePayroll, ValidatedJson, ViewPayroll};
use crate::api::AppState;
use crate::domain::{NewPayroll, Payroll, PayrollPatch};
use crate::errors::AppResult;
use crate::types::{MessageResponse, Paginated, PaginatedPayroll, PaginationParams};

pub fn payroll_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payroll).post(create_payroll))
        .route(
            "/:id",
            get(get_payroll).patch(update_payroll).delete(delete_payroll),
        )
}

#[utoipa::path(
    get,
    path = "/v1/payroll",
    tag = "Payroll",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of payroll entries", body = PaginatedPayroll),
        (status = 403, description = "Requires view_payroll")
    )
)]
pub async fn list_payroll(
    _auth: Authorized<ViewPayroll>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Payroll>>> {
    let (entries, total) = state.services.payroll.list(&params).await?;
    Ok(Json(Paginated::new(entries, &params, total)))
}

#[utoipa::path(
    post,
    path = "/v1/payroll",
    tag = "Payroll",
    security(("bearer_auth" = [])),
    request_body = NewPayroll,
    responses(
        (status = 201, description = "Payroll entry created", body = Payroll),
        (status = 403, description = "Requires manage_payroll"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_payroll(
    _auth: Authorized<ManagePayroll>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewPayroll>,
) -> AppResult<(StatusCode, Json<Payroll>)> {
    let entry = state.services.payroll.create(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/v1/payroll/{id}",
    tag = "Payroll",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payroll entry ID")),
    responses(
        (status = 200, description = "Payroll", body = Payroll),
        (status = 404, description = "Payroll entry not found")
    )
)]
pub async fn get_payroll(
    _auth: Authorized<ViewPayroll>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Payroll>> {
    Ok(Json(state.services.payroll.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/v1/payroll/{id}",
    tag = "Payroll",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payroll entry ID")),
    request_body = PayrollPatch,
    responses(
        (status = 200, description = "Updated payroll entry", body = Payroll),
        (status = 404, description = "Payroll entry not found"),
        (status = 409, description = "Edit conflict")
    )
)]
pub async fn update_payroll(
    _auth: Authorized<ManagePayroll>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<PayrollPatch>,
) -> AppResult<Json<Payroll>> {
    Ok(Json(state.services.payroll.update(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/v1/payroll/{id}",
    tag = "Payroll",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payroll entry ID")),
    responses(
        (status = 200, description = "Payroll entry deleted", body = MessageResponse),
        (status = 404, description = "Payroll entry not found")
    )
)]
pub async fn delete_payroll(
    _auth: Authorized<ManagePayroll>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.payroll.delete(id).await?;
    Ok(Json(MessageResponse::new("payroll entry successfully deleted")))
}
