//! 访问令牌校验
//! TokenGate 负责解析 authorization 头并校验令牌，AuthUser 提取器把校验结果显式传给 handler

use crate::{auth::jwt::JwtService, error::AppError, middleware::AppState, models::AuthIdentity};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;

/// 令牌校验闸门
pub struct TokenGate {
    jwt_service: Arc<JwtService>,
}

impl TokenGate {
    pub fn new(jwt_service: Arc<JwtService>) -> Self {
        Self { jwt_service }
    }

    /// 校验请求头中的访问令牌并返回其中的身份
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthIdentity, AppError> {
        let token = extract_token(headers)?;
        let claims = self.jwt_service.verify(token)?;

        tracing::debug!(user_id = claims.auth_user.id, "Access token verified");

        Ok(claims.auth_user)
    }
}

/// 从 Authorization 头提取令牌
///
/// 含空格时取第一个空格之后的部分（`bearer <token>`），否则整个值即为令牌。
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::MissingAccessToken),
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::InvalidToken("jwt malformed".to_string()))?;

    Ok(match value.split_once(' ') {
        Some((_, token)) => token,
        None => value,
    })
}

/// 已认证用户
///
/// 只能通过 TokenGate 校验得到，handler 以参数形式接收。
#[derive(Debug, Clone)]
pub struct AuthUser(AuthIdentity);

impl AuthUser {
    pub fn identity(&self) -> &AuthIdentity {
        &self.0
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state.token_gate.authenticate(&parts.headers).map(AuthUser)
    }
}
