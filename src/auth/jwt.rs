//! JWT token generation and validation
//! Stateless access tokens carrying the `authUser` identity projection

use crate::{config::AppConfig, error::AppError, models::AuthIdentity};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Access tokens are valid for one day from issuance
pub const ACCESS_TOKEN_TTL_SECS: i64 = 86_400;

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Identity projection of the token owner
    #[serde(rename = "authUser")]
    pub auth_user: AuthIdentity,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::from_secret(config.security.jwt_secret.expose_secret())
    }

    /// Create JWT service from a raw shared secret
    pub fn from_secret(secret: &str) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Sign an access token for the given identity
    pub fn issue_access_token(&self, identity: &AuthIdentity) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(ACCESS_TOKEN_TTL_SECS);

        let claims = AccessClaims {
            auth_user: identity.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "jwt expired",
                    ErrorKind::InvalidSignature => "invalid signature",
                    _ => "jwt malformed",
                };
                AppError::InvalidToken(reason.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_32_characters_long!";

    fn identity() -> AuthIdentity {
        AuthIdentity {
            id: 1,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = JwtService::from_secret(SECRET).unwrap();

        let token = service.issue_access_token(&identity()).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.auth_user, identity());
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_round_trip_unusual_identities() {
        let service = JwtService::from_secret(SECRET).unwrap();
        let identities = [
            AuthIdentity {
                id: i64::MAX,
                name: "Max".to_string(),
                email: "max@example.com".to_string(),
            },
            AuthIdentity {
                id: i64::MIN,
                name: "Min".to_string(),
                email: "min@example.com".to_string(),
            },
            AuthIdentity {
                id: -1,
                name: String::new(),
                email: String::new(),
            },
            AuthIdentity {
                id: 0,
                name: "José Müller 张三 🚀".to_string(),
                email: "usuário@exemplo.com.br".to_string(),
            },
            AuthIdentity {
                id: 3,
                name: "quote \" and \\ backslash".to_string(),
                email: "spaces in@example.com".to_string(),
            },
        ];

        for identity in identities {
            let token = service.issue_access_token(&identity).unwrap();
            let claims = service.verify(&token).unwrap();
            assert_eq!(claims.auth_user, identity);
        }
    }

    #[test]
    fn test_repeated_verification_is_stable() {
        let service = JwtService::from_secret(SECRET).unwrap();
        let token = service.issue_access_token(&identity()).unwrap();

        let first = service.verify(&token).unwrap();
        let second = service.verify(&token).unwrap();
        assert_eq!(first.auth_user, second.auth_user);
        assert_eq!(first.exp, second.exp);
    }

    #[test]
    fn test_secret_too_short() {
        assert!(JwtService::from_secret("short").is_err());
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let issuer = JwtService::from_secret("another_secret_key_32_characters_long").unwrap();
        let verifier = JwtService::from_secret(SECRET).unwrap();

        let token = issuer.issue_access_token(&identity()).unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert_eq!(err.user_message(), "invalid signature");
        assert_eq!(err.code(), 401);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::from_secret(SECRET).unwrap();
        let issued = Utc::now() - Duration::days(2);
        let claims = AccessClaims {
            auth_user: identity(),
            iat: issued.timestamp(),
            exp: (issued + Duration::seconds(ACCESS_TOKEN_TTL_SECS)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        let err = service.verify(&token).unwrap_err();
        assert_eq!(err.user_message(), "jwt expired");
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = JwtService::from_secret(SECRET).unwrap();
        let err = service.verify("invalid_token").unwrap_err();
        assert_eq!(err.user_message(), "jwt malformed");
    }
}
