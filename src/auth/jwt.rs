//! JWT session tokens
//!
//! Tokens are signed with HS256 and carry the user's public profile plus a
//! unique `jti` so that logout can revoke an individual token.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::credentials::User;
use crate::config::MIN_JWT_SECRET_LEN;
use crate::types::FolioError;

/// Payload stored in JWT token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User e-mail
    pub sub: String,
    pub name: String,
    pub role: String,
    /// Token id, used for revocation
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl Claims {
    pub fn user(&self) -> User {
        User {
            name: self.name.clone(),
            email: self.sub.clone(),
            role: self.role.clone(),
        }
    }
}

/// A freshly signed token and the claims inside it
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Signs and checks session tokens with a shared HS256 secret
#[derive(Clone)]
pub struct JwtValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_seconds: u64,
}

impl JwtValidator {
    /// Rejects secrets shorter than [`MIN_JWT_SECRET_LEN`]
    pub fn new(secret: String, expiry_seconds: u64) -> Result<Self, FolioError> {
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(FolioError::Config(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters"
            )));
        }
        Ok(Self::with_secret(secret.as_bytes(), expiry_seconds))
    }

    /// Validator with a fixed, public secret for dev mode
    pub fn new_dev(expiry_seconds: u64) -> Self {
        Self::with_secret(b"dev-mode-secret-not-for-production-use-123456", expiry_seconds)
    }

    fn with_secret(secret: &[u8], expiry_seconds: u64) -> Self {
        // No leeway: revocations are purged at `exp`, so expiry must be exact
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            expiry_seconds,
        }
    }

    pub fn expiry_seconds(&self) -> u64 {
        self.expiry_seconds
    }

    /// Sign a token for an authenticated user
    pub fn generate_token(&self, user: &User) -> Result<IssuedToken, FolioError> {
        let iat = unix_now();
        let claims = Claims {
            sub: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.expiry_seconds,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| FolioError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok(IssuedToken { token, claims })
    }

    /// Decode a token, checking signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims, FolioError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                let reason = match err.kind() {
                    ErrorKind::ExpiredSignature => "Token expired",
                    ErrorKind::InvalidSignature => "Invalid signature",
                    _ => "Invalid token",
                };
                FolioError::Unauthorized(reason.into())
            })
    }
}

/// Extract token from Authorization header.
/// Supports "Bearer <token>" format and raw tokens.
pub fn extract_token_from_header(auth_header: Option<&str>) -> Option<&str> {
    let header = auth_header?;

    if let Some(token) = header.strip_prefix("Bearer ") {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token);
        }
    }

    if !header.contains(' ') {
        let token = header.trim();
        if !token.is_empty() {
            return Some(token);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_validator() -> JwtValidator {
        JwtValidator::new(
            "test-secret-that-is-at-least-32-characters-long".into(),
            3600,
        )
        .unwrap()
    }

    fn user() -> User {
        User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: "Engineer".into(),
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let validator = test_validator();
        let issued = validator.generate_token(&user()).unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(issued.claims.exp - issued.claims.iat, 3600);

        let claims = validator.verify_token(&issued.token).unwrap();
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.user(), user());
    }

    #[test]
    fn test_each_token_has_unique_id() {
        let validator = test_validator();
        let a = validator.generate_token(&user()).unwrap();
        let b = validator.generate_token(&user()).unwrap();
        assert_ne!(a.claims.jti, b.claims.jti);
    }

    #[test]
    fn test_invalid_token() {
        assert!(matches!(
            test_validator().verify_token("invalid-token"),
            Err(FolioError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let other = JwtValidator::new(
            "different-secret-that-is-at-least-32-characters".into(),
            3600,
        )
        .unwrap();

        let issued = test_validator().generate_token(&user()).unwrap();
        assert!(other.verify_token(&issued.token).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header(Some("Bearer abc123")), Some("abc123"));
        assert_eq!(extract_token_from_header(Some("abc123")), Some("abc123"));
        assert_eq!(extract_token_from_header(None), None);
        assert_eq!(extract_token_from_header(Some("")), None);
        assert_eq!(extract_token_from_header(Some("Bearer ")), None);
        assert_eq!(extract_token_from_header(Some("Basic abc123")), None);
    }

    #[test]
    fn test_secret_validation() {
        assert!(JwtValidator::new("short".into(), 3600).is_err());
        assert!(JwtValidator::new("".into(), 3600).is_err());
        assert!(JwtValidator::new("this-secret-is-at-least-32-chars-long".into(), 3600).is_ok());
    }
}
