//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, billing_handler, customer_handler, payroll_handler, token_handler,
    user_handler,
};
use crate::domain::{
    AuthenticationToken, AuthenticationTokenResponse, Billing, BillingPatch, Customer,
    CustomerPatch, NewBilling, NewCustomer, NewPayroll, Payroll, PayrollPatch, Role,
    UserResponse,
};
use crate::types::{
    MessageResponse, PaginatedBilling, PaginatedCustomers, PaginatedPayroll, PaginatedUsers,
    PaginationMeta,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Unboxing API",
        version = "0.1.0",
        description = "Role-based records API with opaque bearer tokens and optimistic concurrency",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(
        token_handler::create_authentication_token,
        token_handler::revoke_authentication_tokens,
        admin_handler::register_admin,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        customer_handler::list_customers,
        customer_handler::create_customer,
        customer_handler::get_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        payroll_handler::list_payroll,
        payroll_handler::create_payroll,
        payroll_handler::get_payroll,
        payroll_handler::update_payroll,
        payroll_handler::delete_payroll,
        billing_handler::list_billing,
        billing_handler::create_billing,
        billing_handler::get_billing,
        billing_handler::update_billing,
        billing_handler::delete_billing,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            Customer,
            NewCustomer,
            CustomerPatch,
            Payroll,
            NewPayroll,
            PayrollPatch,
            Billing,
            NewBilling,
            BillingPatch,
            AuthenticationToken,
            AuthenticationTokenResponse,
            MessageResponse,
            PaginationMeta,
            PaginatedUsers,
            PaginatedCustomers,
            PaginatedPayroll,
            PaginatedBilling,
            token_handler::LoginRequest,
            admin_handler::RegisterAdminRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance and logout"),
        (name = "Administration", description = "Administrator bootstrap"),
        (name = "Users", description = "Staff accounts"),
        (name = "Customers", description = "Customer records"),
        (name = "Payroll", description = "Payroll entries"),
        (name = "Billing", description = "Billing entries")
    )
)]
pub struct ApiDoc;

/// Opaque bearer token scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Token obtained from POST /tokens/authentication"))
                        .build(),
                ),
            );
        }
    }
}
