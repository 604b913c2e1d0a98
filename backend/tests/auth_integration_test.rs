//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let email = format!("register_{}@example.com", uuid::Uuid::new_v4().simple());
    let body = json!({ "email": email, "password": "Secure123456" });

    let (status, response) = app.post("/api/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let response: Value = serde_json::from_str(&response).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
    assert!(!response["refresh_token"].as_str().unwrap().is_empty());
    assert!(!response["userId"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
    assert_eq!(response["user"]["email"], email);

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(&email)
        .execute(&app.pool)
        .await
        .ok();
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_computes_target_from_biometrics() {
    let app = common::TestApp::new().await;
    let user = app
        .register_user(json!({
            "age": 25,
            "sex": "male",
            "height": 175,
            "weight": 70,
            "activity_level": "moderately_active"
        }))
        .await;

    let (status, response) = app.get_auth("/api/auth/me", &user.token).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["target_calories"], 2594);
    assert_eq!(response["activity_level"], "moderately_active");

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    // Same address with different case still collides
    let body = json!({ "email": user.email.to_uppercase(), "password": "Test123456" });
    let (status, response) = app.post("/api/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["code"], "CONFLICT");

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_invalid_input() {
    let app = common::TestApp::new().await;

    for body in [
        json!({ "email": "not-an-email", "password": "Test123456" }),
        json!({ "email": "weak@example.com", "password": "123" }),
        json!({ "email": "age@example.com", "password": "Test123456", "age": 0 }),
        json!({ "email": "sex@example.com", "password": "Test123456", "sex": "other" }),
    ] {
        let (status, response) = app.post("/api/auth/register", &body.to_string()).await;
        assert!(
            status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY,
            "unexpected {} for {}: {}",
            status,
            body,
            response
        );
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "email": user.email, "password": user.password });
    let (status, response) = app.post("/api/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["userId"], user.id);
    assert_eq!(response["user"]["email"], user.email);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password_or_unknown_email() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let wrong_password = json!({ "email": user.email, "password": "Wrong123456" });
    let (status, response) = app.post("/api/auth/login", &wrong_password.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["message"], "Invalid credentials");

    let unknown = json!({ "email": "nobody_here@example.com", "password": "Test123456" });
    let (status, _) = app.post("/api/auth/login", &unknown.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_token_flow() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "refresh_token": user.refresh_token });
    let (status, response) = app.post("/api/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&response).unwrap();
    let token = response["token"].as_str().unwrap();
    let (status, _) = app.get_auth("/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);

    // An access token is not accepted as a refresh token
    let body = json!({ "refresh_token": user.token });
    let (status, _) = app.post("/api/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_after_user_deleted() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    app.cleanup_user(&user).await;

    let body = json!({ "refresh_token": user.refresh_token });
    let (status, _) = app.post("/api/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
