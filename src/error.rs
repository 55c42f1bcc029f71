//! 统一错误模型
//! 定义所有错误类型和错误响应格式，HTTP 边界只在这里做一次状态码映射

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // 输入校验
    #[error("User email was not informed.")]
    MissingEmail,

    #[error("Email and password must be informed.")]
    MissingCredentials,

    // 查询无结果
    #[error("User was not found.")]
    UserNotFound,

    // 身份与资源所有者不一致
    #[error("You cannot see this user data.")]
    Forbidden,

    // 凭证错误
    #[error("Access token was not informed.")]
    MissingAccessToken,

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("Password doesn't match.")]
    PasswordMismatch,

    // 其他异常
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingEmail | AppError::UserNotFound => StatusCode::BAD_REQUEST,
            AppError::MissingCredentials
            | AppError::MissingAccessToken
            | AppError::InvalidToken(_)
            | AppError::PasswordMismatch => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidToken(reason) => reason.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// 错误响应 DTO
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            status: error.code(),
            message: error.user_message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::from(&self);

        if status.is_server_error() {
            tracing::error!(code = body.status, error = %self, "Application error");
        } else {
            tracing::warn!(code = body.status, error = %self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::MissingEmail.code(), 400);
        assert_eq!(AppError::UserNotFound.code(), 400);
        assert_eq!(AppError::MissingCredentials.code(), 401);
        assert_eq!(AppError::MissingAccessToken.code(), 401);
        assert_eq!(AppError::PasswordMismatch.code(), 401);
        assert_eq!(AppError::InvalidToken("jwt expired".to_string()).code(), 401);
        assert_eq!(AppError::Forbidden.code(), 403);
        assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let message = error.user_message();
        assert_eq!(message, "Database error occurred");
        assert!(!message.contains("sqlx"));

        let error = AppError::Internal("argon2 parse failure at offset 3".to_string());
        assert_eq!(error.user_message(), "Internal server error");
    }

    #[test]
    fn test_invalid_token_exposes_only_reason() {
        let error = AppError::InvalidToken("invalid signature".to_string());
        assert_eq!(error.user_message(), "invalid signature");
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::from(&AppError::Forbidden);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 403);
        assert_eq!(json["message"], "You cannot see this user data.");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
