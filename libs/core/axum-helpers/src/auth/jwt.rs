use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in seconds (1 hour)
pub const TOKEN_TTL: i64 = 3600;

/// Claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id
    pub sub: String,
    /// User role at issue time
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl JwtClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}

/// Issues and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_seconds: TOKEN_TTL,
        }
    }

    /// Override the token lifetime (tests use a negative TTL to mint expired tokens).
    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn create_token(&self, user_id: &str, role: &str) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Checks signature and expiry and returns the claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<JwtClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-at-least-32-characters").unwrap())
    }

    #[test]
    fn test_token_carries_subject_and_role() {
        let auth = auth();
        let token = auth.create_token("user-1", "admin").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert!(claims.has_role("admin"));
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let auth = auth();
        let a = auth.verify_token(&auth.create_token("u", "user").unwrap()).unwrap();
        let b = auth.verify_token(&auth.create_token("u", "user").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_rejects_token_signed_with_other_secret() {
        let other =
            JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-characters-long").unwrap());
        let token = other.create_token("user-1", "user").unwrap();
        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let expired = auth().with_ttl(-60);
        let token = expired.create_token("user-1", "user").unwrap();
        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(auth().verify_token("not.a.token").is_err());
    }
}
