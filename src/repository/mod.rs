//! Repository layer - 数据访问

pub mod user_repo;

pub use user_repo::{PgUserRepository, UserRepository};
