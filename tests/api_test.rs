//! Integration tests for API endpoints.
//!
//! The full router runs against SQLite in memory; requests carry bearer
//! tokens minted with the same secret the server verifies with.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use profile_api::api::{create_router, AppState};
use profile_api::config::Config;
use profile_api::infra::Database;
use profile_api::services::Claims;

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
const UNLINKED_IDENTITY: &str = "11111111-1111-1111-1111-111111111111";

async fn app() -> Router {
    let mut config = Config::new("sqlite::memory:", TEST_SECRET).unwrap();
    config.db_max_connections = 1;

    let db = Database::connect(&config)
        .await
        .expect("Failed to connect to test database");

    create_router(AppState::from_config(Arc::new(db), &config))
}

fn token_for(subject: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        location,
        body,
    }
}

fn ada(identity_id: &str) -> Value {
    json!({
        "identityId": identity_id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@x.com",
        "phone": "123",
        "dateOfBirth": "1815-12-10",
        "country": "UK"
    })
}

fn profile_update() -> Value {
    json!({
        "address": "12 Main St",
        "sex": "F",
        "mobileNumber": "555",
        "country": "US"
    })
}

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = app().await;
    let response = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = app().await;
    let response = send(&app, Method::GET, "/api/v1/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], 401);
    assert_eq!(response.body["error"]["type"], "Unauthorized");
    assert!(response.body.get("content").is_none());
}

#[tokio::test]
async fn test_token_with_foreign_signature_is_unauthorized() {
    let app = app().await;
    let forged = encode(
        &Header::default(),
        &Claims {
            sub: UNLINKED_IDENTITY.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
        },
        &EncodingKey::from_secret(b"some-other-secret-of-sufficient-size"),
    )
    .unwrap();

    let response = send(&app, Method::GET, "/api/v1/users", Some(&forged), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_user_then_fetch_it() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());
    let identity_id = Uuid::new_v4().to_string();

    let created = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(&token),
        Some(ada(&identity_id)),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    let user = &created.body["content"];
    assert_eq!(user["status"], 1);
    assert_eq!(user["firstName"], "Ada");
    assert_eq!(user["dateOfBirth"], "1815-12-10");
    assert_eq!(user["identityId"], identity_id);
    assert!(created.body.get("error").is_none());

    let id = user["id"].as_str().unwrap();
    let location = created.location.unwrap();
    assert_eq!(location, format!("/api/v1/users/{}", id));

    let fetched = send(&app, Method::GET, &location, Some(&token), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["content"]["id"], id);
    assert_eq!(fetched.body["content"]["email"], "ada@x.com");
    assert_eq!(fetched.body["content"]["country"], "UK");
    assert_eq!(fetched.body["content"]["status"], 1);

    let listed = send(&app, Method::GET, "/api/v1/users", Some(&token), None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["resultCount"], 1);
    assert_eq!(listed.body["content"][0]["id"], id);
}

#[tokio::test]
async fn test_create_user_without_identity_generates_one() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());
    let mut body = ada("");
    body.as_object_mut().unwrap().remove("identityId");

    let created = send(&app, Method::POST, "/api/v1/users", Some(&token), Some(body)).await;

    assert_eq!(created.status, StatusCode::CREATED);
    let identity_id = created.body["content"]["identityId"].as_str().unwrap();
    assert!(Uuid::parse_str(identity_id).is_ok());
}

#[tokio::test]
async fn test_create_user_rejects_invalid_input() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());
    let mut body = ada(&Uuid::new_v4().to_string());
    body["email"] = json!("not-an-email");

    let response = send(&app, Method::POST, "/api/v1/users", Some(&token), Some(body)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["type"], "Validation Error");
    assert_eq!(response.body["error"]["message"], "Invalid email format");

    let listed = send(&app, Method::GET, "/api/v1/users", Some(&token), None).await;
    assert_eq!(listed.body["resultCount"], 0);
}

#[tokio::test]
async fn test_create_user_rejects_malformed_date() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());
    let mut body = ada(&Uuid::new_v4().to_string());
    body["dateOfBirth"] = json!("10/12/1815");

    let response = send(&app, Method::POST, "/api/v1/users", Some(&token), Some(body)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["type"], "Validation Error");
}

#[tokio::test]
async fn test_duplicate_identity_is_a_persistence_failure() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());
    let identity_id = Uuid::new_v4().to_string();

    let first = send(&app, Method::POST, "/api/v1/users", Some(&token), Some(ada(&identity_id))).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&app, Method::POST, "/api/v1/users", Some(&token), Some(ada(&identity_id))).await;
    assert_eq!(second.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(second.body["error"]["type"], "Persistence Failure");
    assert_eq!(second.body["error"]["message"], "Unable to process request");

    let listed = send(&app, Method::GET, "/api/v1/users", Some(&token), None).await;
    assert_eq!(listed.body["resultCount"], 1);
}

#[tokio::test]
async fn test_unknown_user_is_object_not_found() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());
    let uri = format!("/api/v1/users/{}", Uuid::new_v4());

    let response = send(&app, Method::GET, &uri, Some(&token), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({ "error": { "code": 404, "message": "Object not found", "type": "Not Found" } })
    );
}

#[tokio::test]
async fn test_malformed_user_id_is_object_not_found() {
    let app = app().await;
    let token = token_for(&Uuid::new_v4().to_string());

    let response = send(&app, Method::GET, "/api/v1/users/42", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["message"], "Object not found");
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_unlinked_identity_has_no_profile() {
    let app = app().await;
    let token = token_for(UNLINKED_IDENTITY);

    let response = send(&app, Method::GET, "/api/v1/profile", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({ "error": { "code": 404, "message": "User not found", "type": "Not Found" } })
    );
}

#[tokio::test]
async fn test_unlinked_identity_update_mutates_nothing() {
    let app = app().await;
    let admin = token_for(&Uuid::new_v4().to_string());
    let existing = Uuid::new_v4().to_string();
    send(&app, Method::POST, "/api/v1/users", Some(&admin), Some(ada(&existing))).await;

    let token = token_for(UNLINKED_IDENTITY);
    let response = send(
        &app,
        Method::PUT,
        "/api/v1/profile",
        Some(&token),
        Some(profile_update()),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["message"], "User not found");

    let listed = send(&app, Method::GET, "/api/v1/users", Some(&admin), None).await;
    assert_eq!(listed.body["resultCount"], 1);
    assert_eq!(listed.body["content"][0]["address"], Value::Null);
    assert_eq!(listed.body["content"][0]["country"], "UK");
}

#[tokio::test]
async fn test_malformed_identity_is_bad_request() {
    let app = app().await;
    let token = token_for("not-a-uuid");

    let response = send(&app, Method::GET, "/api/v1/profile", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], 400);
    assert_eq!(response.body["error"]["type"], "Bad Request");
}

#[tokio::test]
async fn test_get_profile_of_linked_identity() {
    let app = app().await;
    let identity_id = Uuid::new_v4().to_string();
    let token = token_for(&identity_id);
    send(&app, Method::POST, "/api/v1/users", Some(&token), Some(ada(&identity_id))).await;

    let response = send(&app, Method::GET, "/api/v1/profile", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["content"]["identityId"], identity_id);
    assert_eq!(response.body["content"]["lastName"], "Lovelace");
}

#[tokio::test]
async fn test_update_profile_changes_exactly_four_fields() {
    let app = app().await;
    let identity_id = Uuid::new_v4().to_string();
    let token = token_for(&identity_id);
    let created = send(&app, Method::POST, "/api/v1/users", Some(&token), Some(ada(&identity_id))).await;
    let before = created.body["content"].clone();

    let mut update = profile_update();
    // Fields outside the profile subset are ignored
    update["email"] = json!("changed@x.com");
    update["firstName"] = json!("Grace");

    let response = send(&app, Method::PUT, "/api/v1/profile", Some(&token), Some(update)).await;

    assert_eq!(response.status, StatusCode::OK);
    let after = &response.body["content"];
    assert_eq!(after["address"], "12 Main St");
    assert_eq!(after["sex"], "F");
    assert_eq!(after["mobileNumber"], "555");
    assert_eq!(after["country"], "US");
    for unchanged in ["id", "identityId", "firstName", "lastName", "email", "phone", "dateOfBirth", "status"] {
        assert_eq!(after[unchanged], before[unchanged], "{} changed", unchanged);
    }

    let fetched = send(&app, Method::GET, "/api/v1/profile", Some(&token), None).await;
    assert_eq!(fetched.body["content"]["address"], "12 Main St");
    assert_eq!(fetched.body["content"]["email"], "ada@x.com");
}

#[tokio::test]
async fn test_update_profile_is_idempotent() {
    let app = app().await;
    let identity_id = Uuid::new_v4().to_string();
    let token = token_for(&identity_id);
    send(&app, Method::POST, "/api/v1/users", Some(&token), Some(ada(&identity_id))).await;

    let first = send(&app, Method::PUT, "/api/v1/profile", Some(&token), Some(profile_update())).await;
    let second = send(&app, Method::PUT, "/api/v1/profile", Some(&token), Some(profile_update())).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    for field in ["address", "sex", "mobileNumber", "country", "email", "firstName"] {
        assert_eq!(first.body["content"][field], second.body["content"][field]);
    }
}

#[tokio::test]
async fn test_update_profile_validation_failure_leaves_profile() {
    let app = app().await;
    let identity_id = Uuid::new_v4().to_string();
    let token = token_for(&identity_id);
    send(&app, Method::POST, "/api/v1/users", Some(&token), Some(ada(&identity_id))).await;

    let mut update = profile_update();
    update["address"] = json!("");

    let response = send(&app, Method::PUT, "/api/v1/profile", Some(&token), Some(update)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["type"], "Validation Error");
    assert_eq!(response.body["error"]["message"], "Address is required");

    let fetched = send(&app, Method::GET, "/api/v1/profile", Some(&token), None).await;
    assert_eq!(fetched.body["content"]["address"], Value::Null);
    assert_eq!(fetched.body["content"]["country"], "UK");
}
