//! Surface-level API tests: routing, input validation, auth gating, and
//! the error envelope, exercised through the full middleware stack.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::build_test_app;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn health_returns_ok() {
    let app = build_test_app();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app();

    let response = app
        .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unmounting_unknown_session_is_not_found_with_envelope() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::delete("/api/v1/onboarding/sessions/ghost@x.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["error"].as_str().unwrap().contains("ghost@x.com"));
}

#[tokio::test]
async fn mounting_without_email_is_bad_request() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/onboarding/sessions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn creating_field_without_label_is_rejected() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/form-fields")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type": "text", "page": 2}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("label"));
}

#[tokio::test]
async fn creating_field_with_unknown_type_is_rejected() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/form-fields")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"type": "slider", "label": "Volume", "page": 2}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn registering_without_password_is_bad_request() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email": "ann@x.com", "password": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn listing_users_requires_auth() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::get("/api/v1/admin/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn preferences_reject_malformed_bearer_token() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::get("/api/v1/user/preferences/dark_mode")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn avatar_upload_returns_opaque_url() {
    let app = build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/uploads/avatar")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let url = body["data"]["url"].as_str().expect("url is a string");
    assert!(url.starts_with("https://"));
    assert_eq!(body["data"]["form_key"], "profileImage");
}
