//! Authentication module: token signing, password hashing and the token gate

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{AccessClaims, JwtService, ACCESS_TOKEN_TTL_SECS};
pub use middleware::{extract_token, AuthUser, TokenGate};
pub use password::PasswordHasher;
