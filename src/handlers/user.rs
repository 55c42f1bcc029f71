//! 用户相关的 HTTP 处理器

use crate::{
    auth::AuthUser,
    error::AppError,
    middleware::AppState,
    models::{AccessTokenResponse, LoginRequest, UserLookupResponse},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 登录，签发访问令牌
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // 请求体缺失或无法解析时按未提供凭证处理
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Login body rejected");
            LoginRequest::default()
        }
    };

    let access_token = state
        .user_service
        .get_access_token(req.email.as_deref(), req.password.as_deref())
        .await?;

    Ok(Json(AccessTokenResponse {
        status: StatusCode::OK.as_u16(),
        access_token,
    }))
}

/// 按邮箱查询本人资料
pub async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_service
        .find_by_email(&email, Some(auth_user.identity()))
        .await?;

    Ok(Json(UserLookupResponse {
        status: StatusCode::OK.as_u16(),
        user,
    }))
}
