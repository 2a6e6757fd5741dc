//! HTTP tests for the API router.
//!
//! The router runs on top of the in-memory store, so requests exercise the
//! real extractors, gate and services without a database.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::MemoryStore;
use unboxing_api::api::{create_router, AppState};
use unboxing_api::config::SCOPE_AUTHENTICATION;
use unboxing_api::domain::{Role, User};
use unboxing_api::services::TokenService;

fn app(store: &Arc<MemoryStore>) -> Router {
    create_router(AppState::from_store(store.clone(), &common::test_config()))
}

async fn bearer_for(store: &Arc<MemoryStore>, user: &User) -> String {
    common::services(store)
        .tokens
        .issue(user.id, Duration::hours(1), SCOPE_AUTHENTICATION)
        .await
        .unwrap()
        .plaintext
}

fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Tokens
// =============================================================================

#[tokio::test]
async fn test_login_returns_created_token() {
    let store = MemoryStore::new();
    store.seed_user("jane@example.com", Role::Sales).await;

    let response = app(&store)
        .oneshot(request(
            Method::POST,
            "/tokens/authentication",
            None,
            Some(json!({ "email": "jane@example.com", "password": common::TEST_PASSWORD })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["authentication_token"]["token"].as_str().is_some());
    assert!(body["authentication_token"]["expiry"].as_str().is_some());
}

#[tokio::test]
async fn test_login_accepts_form_encoding() {
    let store = MemoryStore::new();
    store.seed_user("form@example.com", Role::Hr).await;

    let form = format!(
        "email=form%40example.com&password={}",
        common::TEST_PASSWORD
    );
    let response = app(&store)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/tokens/authentication")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let store = MemoryStore::new();
    store.seed_user("jane@example.com", Role::Sales).await;

    let response = app(&store)
        .oneshot(request(
            Method::POST,
            "/tokens/authentication",
            None,
            Some(json!({ "email": "jane@example.com", "password": "wrong-password" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_logout_revokes_caller_tokens() {
    let store = MemoryStore::new();
    let user = store.seed_user("leaving@example.com", Role::Sales).await;
    let token = bearer_for(&store, &user).await;
    let app = app(&store);

    let response = app
        .clone()
        .oneshot(request(Method::DELETE, "/tokens/authentication", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(Method::GET, "/v1/customer", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Gate
// =============================================================================

#[tokio::test]
async fn test_missing_token_is_401_without_challenge() {
    let store = MemoryStore::new();

    let response = app(&store)
        .oneshot(request(Method::GET, "/v1/customer", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    assert_eq!(body_json(response).await["error"]["code"], "AUTHENTICATION_REQUIRED");
}

#[tokio::test]
async fn test_unknown_token_is_401_with_challenge() {
    let store = MemoryStore::new();

    let response = app(&store)
        .oneshot(request(Method::GET, "/v1/customer", Some("not-a-token"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_sales_cannot_manage_employees() {
    let store = MemoryStore::new();
    let sales = store.seed_user("sales@example.com", Role::Sales).await;
    let token = bearer_for(&store, &sales).await;

    let response = app(&store)
        .oneshot(request(Method::GET, "/v1/user", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_PERMITTED");
}

#[tokio::test]
async fn test_accountant_reads_but_cannot_write_payroll() {
    let store = MemoryStore::new();
    let accountant = store.seed_user("acc@example.com", Role::Accountant).await;
    let token = bearer_for(&store, &accountant).await;
    let app = app(&store);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/v1/payroll", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/payroll",
            Some(&token),
            Some(json!({ "employee_id": accountant.id, "amount": 10.0, "date": "2024-02-29" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Records
// =============================================================================

#[tokio::test]
async fn test_customer_lifecycle() {
    let store = MemoryStore::new();
    let sales = store.seed_user("sales@example.com", Role::Sales).await;
    let token = bearer_for(&store, &sales).await;
    let app = app(&store);

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/customer",
            Some(&token),
            Some(json!({ "name": "Acme", "email": "ops@acme.example" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["version"], 1);
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/v1/customer/{id}"),
            Some(&token),
            Some(json!({ "phone": "555-0199", "version": 99 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["phone"], "555-0199");
    assert_eq!(updated["name"], "Acme");
    assert_eq!(updated["version"], 2);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/v1/customer?page=1&page_size=10", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["data"][0]["id"], id);

    let response = app
        .clone()
        .oneshot(request(Method::DELETE, &format!("/v1/customer/{id}"), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(Method::DELETE, &format!("/v1/customer/{id}"), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_customer_payload_is_422() {
    let store = MemoryStore::new();
    let sales = store.seed_user("sales@example.com", Role::Sales).await;
    let token = bearer_for(&store, &sales).await;

    let response = app(&store)
        .oneshot(request(
            Method::POST,
            "/v1/customer",
            Some(&token),
            Some(json!({ "name": "", "email": "not-an-email" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let store = MemoryStore::new();
    let admin = store.seed_user("admin@example.com", Role::Administrator).await;
    let token = bearer_for(&store, &admin).await;

    let response = app(&store)
        .oneshot(request(
            Method::POST,
            "/v1/user",
            Some(&token),
            Some(json!({
                "name": "Copy",
                "email": "admin@example.com",
                "password": "long-enough-password",
                "role": "Sales"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"]["code"], "DUPLICATE");
}

#[tokio::test]
async fn test_user_response_hides_credential() {
    let store = MemoryStore::new();
    let admin = store.seed_user("admin@example.com", Role::Administrator).await;
    let token = bearer_for(&store, &admin).await;

    let response = app(&store)
        .oneshot(request(
            Method::POST,
            "/v1/user",
            Some(&token),
            Some(json!({
                "name": "Harriet",
                "email": "hr@example.com",
                "password": "long-enough-password",
                "role": "HR"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["role"], "HR");
    assert!(body.get("credential").is_none());
    assert!(!body.to_string().contains("argon2"));
}

// =============================================================================
// Admin bootstrap
// =============================================================================

#[tokio::test]
async fn test_admin_register_requires_matching_key() {
    let store = MemoryStore::new();
    let app = app(&store);
    let payload = |key: &str| {
        json!({
            "name": "Root",
            "email": "root@example.com",
            "password": "long-enough-password",
            "secret_key": key
        })
    };

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/admin/register", None, Some(payload("guess"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request(
            Method::POST,
            "/admin/register",
            None,
            Some(payload("bootstrap-secret")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["role"], "Administrator");
}
