//! 数据库连接池与迁移管理
//! 提供 PostgreSQL 连接池、迁移执行、初始数据和健康检查

use crate::{
    auth::PasswordHasher, config::DatabaseConfig, error::AppError,
    repository::PgUserRepository,
};
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// 初始演示用户：(name, email, password)
const INITIAL_USERS: [(&str, &str, &str); 2] = [
    ("Test User", "testuser1@gmail.com", "123456"),
    ("Test User 2", "testuser2@gmail.com", "123456"),
];

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let db_url = config.url.expose_secret();

    tracing::debug!("Creating database connection pool...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect(db_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database pool: {}", e);
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool created successfully"
    );

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            tracing::error!("Migration failed: {}", e);
            DbError::MigrationFailed(e.to_string())
        })?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// 写入初始演示用户，users 表非空时跳过
pub async fn seed_initial_data(pool: &PgPool) -> Result<(), AppError> {
    let repo = PgUserRepository::new(pool.clone());

    if repo.count().await? > 0 {
        tracing::debug!("Users table not empty, skipping initial data");
        return Ok(());
    }

    let hasher = PasswordHasher::new();
    for (name, email, password) in INITIAL_USERS {
        let password_hash = hasher.hash(password)?;
        let user = repo.create(name, email, &password_hash).await?;
        tracing::info!(user_id = user.id, email = %user.email, "Initial user created");
    }

    Ok(())
}

/// 数据库健康检查
pub async fn health_check(pool: &PgPool) -> HealthStatus {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => {
            tracing::debug!("Database health check: OK");
            HealthStatus::Healthy
        }
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            HealthStatus::Unhealthy(e.to_string())
        }
    }
}

/// 数据库错误类型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// 健康状态
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}
