//! 数据模型模块

pub mod auth;
pub mod user;

pub use auth::{AccessTokenResponse, LoginRequest, UserLookupResponse};
pub use user::{AuthIdentity, User, UserResponse};
