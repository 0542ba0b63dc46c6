// Doctor management is admin-only; every test authenticates through the
// full middleware stack against a mocked users table.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{JwtTestUtils, MockStoreResponses, TestConfig, TestUser};

const DOCTOR_ID: &str = "9a8b7c6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d";

async fn setup(server: &MockServer, caller: &TestUser) -> (Router, String) {
    let config = TestConfig::with_store_url(&server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", caller.email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([MockStoreResponses::role_row(caller)])))
        .mount(server)
        .await;

    let token = JwtTestUtils::create_test_token(&caller.email, &config.jwt_secret, None);
    (doctor_routes(config.to_state()), token)
}

fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_list_doctors_as_admin() {
    let server = MockServer::start().await;
    let (app, token) = setup(&server, &TestUser::admin("boss@x.com")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor_row("Dr. Grey", "grey@x.com", "Orthodontics")
        ])))
        .mount(&server)
        .await;

    let response = app.oneshot(request("GET", "/", &token, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body[0]["name"], "Dr. Grey");
    assert_eq!(body[0]["specialty"], "Orthodontics");
}

#[tokio::test]
async fn test_list_doctors_as_member_is_forbidden() {
    let server = MockServer::start().await;
    let (app, token) = setup(&server, &TestUser::member("patient@x.com")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let response = app.oneshot(request("GET", "/", &token, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_doctors_without_token_is_unauthorized() {
    let server = MockServer::start().await;
    let app = doctor_routes(TestConfig::with_store_url(&server.uri()).to_state());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_doctor_returns_insert_ack() {
    let server = MockServer::start().await;
    let (app, token) = setup(&server, &TestUser::admin("boss@x.com")).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::doctor_row("Dr. Grey", "grey@x.com", "Orthodontics")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let body = json!({ "name": "Dr. Grey", "email": "grey@x.com", "specialty": "Orthodontics" });
    let response = app.oneshot(request("POST", "/", &token, Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "acknowledged": true, "insertedId": DOCTOR_ID }));
}

#[tokio::test]
async fn test_create_doctor_missing_specialty_is_bad_request() {
    let server = MockServer::start().await;
    let (app, token) = setup(&server, &TestUser::admin("boss@x.com")).await;

    let body = json!({ "name": "Dr. Grey", "email": "grey@x.com" });
    let response = app.oneshot(request("POST", "/", &token, Some(body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_doctor_reports_count() {
    let server = MockServer::start().await;
    let (app, token) = setup(&server, &TestUser::admin("boss@x.com")).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", DOCTOR_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor_row("Dr. Grey", "grey@x.com", "Orthodontics")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = format!("/{}", DOCTOR_ID);
    let response = app.oneshot(request("DELETE", &uri, &token, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "acknowledged": true, "deletedCount": 1 }));
}

#[tokio::test]
async fn test_delete_doctor_with_malformed_id_is_bad_request() {
    let server = MockServer::start().await;
    let (app, token) = setup(&server, &TestUser::admin("boss@x.com")).await;

    let response = app.oneshot(request("DELETE", "/not-a-uuid", &token, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
