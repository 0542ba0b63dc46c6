use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::AppState;
use shared_models::auth::{AuthenticatedUser, Role};
use shared_utils::extractor::{auth_middleware, require_admin};
use shared_utils::test_utils::{JwtTestUtils, MockStoreResponses, TestConfig, TestUser};

async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
    format!("{}:{:?}", user.email, user.role)
}

fn test_app(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/admin", get(|| async { "ok" }))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/me", get(whoami))
        .merge(admin)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

async fn mount_role(server: &MockServer, user: &TestUser) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", user.email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([MockStoreResponses::role_row(user)])))
        .mount(server)
        .await;
}

fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = test_app(TestConfig::default().to_state());

    let response = app.oneshot(get_with_token("/me", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_header_is_forbidden() {
    let app = test_app(TestConfig::default().to_state());

    let request = Request::builder()
        .uri("/me")
        .header("authorization", "Basic YTpi")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_signature_is_forbidden() {
    let app = test_app(TestConfig::default().to_state());
    let token = JwtTestUtils::create_invalid_signature_token("a@x.com");

    let response = app.oneshot(get_with_token("/me", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    let config = TestConfig::default();
    let token = JwtTestUtils::create_expired_token("a@x.com", &config.jwt_secret);
    let app = test_app(config.to_state());

    let response = app.oneshot(get_with_token("/me", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_is_resolved_from_user_record() {
    let server = MockServer::start().await;
    let config = TestConfig::with_store_url(&server.uri());
    let admin = TestUser::admin("boss@x.com");
    mount_role(&server, &admin).await;

    let token = JwtTestUtils::create_test_token(&admin.email, &config.jwt_secret, None);
    let app = test_app(config.to_state());

    let response = app.oneshot(get_with_token("/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, format!("boss@x.com:{:?}", Role::Admin));
}

#[tokio::test]
async fn test_unknown_user_is_member_and_denied_admin_routes() {
    let server = MockServer::start().await;
    let config = TestConfig::with_store_url(&server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let token = JwtTestUtils::create_test_token("stranger@x.com", &config.jwt_secret, None);
    let app = test_app(config.to_state());

    let response = app.oneshot(get_with_token("/admin", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_passes_admin_routes() {
    let server = MockServer::start().await;
    let config = TestConfig::with_store_url(&server.uri());
    let admin = TestUser::admin("boss@x.com");
    mount_role(&server, &admin).await;

    let token = JwtTestUtils::create_test_token(&admin.email, &config.jwt_secret, None);
    let app = test_app(config.to_state());

    let response = app.oneshot(get_with_token("/admin", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
