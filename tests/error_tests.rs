//! 错误处理单元测试
//!
//! 测试错误到 HTTP 响应的统一映射

use auth_api::error::AppError;
use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;

async fn response_parts(error: AppError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_validation_errors() {
    let (status, body) = response_parts(AppError::MissingEmail).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "User email was not informed.");

    let (status, body) = response_parts(AppError::MissingCredentials).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Email and password must be informed.");
}

#[tokio::test]
async fn test_credential_errors() {
    let (status, body) = response_parts(AppError::MissingAccessToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token was not informed.");

    let (status, body) = response_parts(AppError::InvalidToken("jwt expired".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "jwt expired");
}

#[tokio::test]
async fn test_unexpected_errors_hide_details() {
    let (status, body) =
        response_parts(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "Database error occurred");

    let (_, body) = response_parts(AppError::Config("secret=abc".to_string())).await;
    assert!(!body["message"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_body_has_only_status_and_message() {
    let (_, body) = response_parts(AppError::UserNotFound).await;
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "User was not found.");
}
