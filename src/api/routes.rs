//! Application route configuration.

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_routes, billing_routes, customer_routes, payroll_routes, token_routes, user_routes,
};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured.
///
/// Authorization is declared per handler through the `Authorized<P>` extractor,
/// so no route layer carries authentication state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public: login, logout and admin bootstrap
        .nest("/tokens", token_routes())
        .nest("/admin", admin_routes())
        // Permission-gated resources
        .nest("/v1/user", user_routes())
        .nest("/v1/customer", customer_routes())
        .nest("/v1/payroll", payroll_routes())
        .nest("/v1/billing", billing_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
