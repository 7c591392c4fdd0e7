//! Integration tests for bearer authentication.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/files", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.str_at("/error"), "User not authenticated");
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/folders", None, Some(""))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = helpers::TestApp::new();
    let (token, _) = app
        .encoder
        .issue_expired(uuid::Uuid::new_v4())
        .expect("Failed to issue token");

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.str_at("/error"), "Token has expired");
}

#[tokio::test]
async fn test_foreign_signature_is_unauthorized() {
    let app = helpers::TestApp::new();
    let foreign = drive_auth::JwtEncoder::new(&drive_core::config::AuthConfig {
        jwt_secret: "some-other-secret".to_string(),
        ..drive_core::config::AuthConfig::default()
    });
    let (token, _) = foreign
        .issue(uuid::Uuid::new_v4(), 5)
        .expect("Failed to issue token");

    let response = app.request("GET", "/api/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/status"), "ok");
    assert_eq!(response.str_at("/storage"), "available");
}

#[tokio::test]
async fn test_blob_without_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/blobs/some/key.txt", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
