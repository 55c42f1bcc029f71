//! 用户服务：登录签发令牌、查询本人资料

use crate::{
    auth::{JwtService, PasswordHasher},
    error::AppError,
    models::{AuthIdentity, User, UserResponse},
    repository::UserRepository,
};
use std::sync::Arc;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        jwt_service: Arc<JwtService>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            repo,
            jwt_service,
            hasher,
        }
    }

    /// 查询用户资料，只允许查询令牌所属账户本身
    pub async fn find_by_email(
        &self,
        email: &str,
        auth_user: Option<&AuthIdentity>,
    ) -> Result<UserResponse, AppError> {
        if email.is_empty() {
            return Err(AppError::MissingEmail);
        }

        let user = self.find_existing(email).await?;

        // 按 id 判断归属，而不是比较请求中的邮箱
        match auth_user {
            Some(identity) if identity.id == user.id => Ok(UserResponse::from(user)),
            _ => {
                tracing::warn!(
                    requester = auth_user.map(|identity| identity.id),
                    owner = user.id,
                    "User data requested by another account"
                );
                Err(AppError::Forbidden)
            }
        }
    }

    /// 校验邮箱和密码并签发访问令牌
    pub async fn get_access_token(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, AppError> {
        let (email, password) = match (non_empty(email), non_empty(password)) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(AppError::MissingCredentials),
        };

        let user = self.find_existing(email).await?;
        self.validate_password(password, &user.password).await?;

        let token = self.jwt_service.issue_access_token(&AuthIdentity::from(&user))?;

        tracing::info!(user_id = user.id, "Access token issued");

        Ok(token)
    }

    async fn find_existing(&self, email: &str) -> Result<User, AppError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// 哈希比较放到阻塞线程池，避免占用异步工作线程
    async fn validate_password(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        let matched = tokio::task::spawn_blocking(move || hasher.matches(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

        if matched {
            Ok(())
        } else {
            Err(AppError::PasswordMismatch)
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
