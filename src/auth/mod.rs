//! Authentication for Folio
//!
//! Provides:
//! - Argon2 password hashing
//! - A credential store loaded from a users file
//! - JWT token generation and validation
//! - Token revocation on logout
//! - `Authority`, the verifying authority behind the session context

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod revocation;

pub use credentials::{CredentialStore, Credentials, User, UserRecord};
pub use jwt::{extract_token_from_header, Claims, IssuedToken, JwtValidator};
pub use password::{hash_password, verify_password};
pub use revocation::{spawn_cleanup_task, RevocationList};

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Args;
use crate::types::{FolioError, Result};

/// Role given to placeholder dev-mode sessions
pub const DEV_ROLE: &str = "Guest";

/// Verifies credentials, issues tokens and tracks revocations
pub struct Authority {
    jwt: JwtValidator,
    credentials: Option<CredentialStore>,
    revocations: Arc<RevocationList>,
    dev_mode: bool,
}

impl Authority {
    pub fn new(jwt: JwtValidator, credentials: Option<CredentialStore>, dev_mode: bool) -> Self {
        Self {
            jwt,
            credentials,
            revocations: Arc::new(RevocationList::new()),
            dev_mode,
        }
    }

    /// Build the authority from configuration, loading the users file if set
    pub fn from_args(args: &Args) -> Result<Self> {
        let jwt = match (&args.jwt_secret, args.dev_mode) {
            (Some(secret), _) => JwtValidator::new(secret.clone(), args.jwt_expiry_seconds)?,
            (None, true) => JwtValidator::new_dev(args.jwt_expiry_seconds),
            (None, false) => {
                return Err(FolioError::Config(
                    "JWT_SECRET is required in production mode".into(),
                ))
            }
        };

        let credentials = match &args.users_path {
            Some(path) => Some(CredentialStore::load(path)?),
            None => None,
        };

        Ok(Self::new(jwt, credentials, args.dev_mode))
    }

    pub fn revocations(&self) -> Arc<RevocationList> {
        Arc::clone(&self.revocations)
    }

    /// Whether logins are checked against a credential store
    pub fn verifies_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Verify credentials and issue a session token
    pub fn login(&self, credentials: &Credentials) -> Result<IssuedToken> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(FolioError::BadRequest(
                "Missing required fields: email, password".into(),
            ));
        }

        let user = match &self.credentials {
            Some(store) => store.verify(credentials)?,
            None if self.dev_mode => {
                warn!(
                    "Dev mode login without credential store, accepting: {}",
                    credentials.email
                );
                placeholder_user(&credentials.email)
            }
            None => {
                return Err(FolioError::Unavailable(
                    "Authentication not enabled (missing USERS_PATH)".into(),
                ))
            }
        };

        info!("Login successful: {}", user.email);
        self.jwt.generate_token(&user)
    }

    /// Validate a token and reject revoked ones
    pub fn authenticate(&self, token: &str) -> Result<Claims> {
        let claims = self.jwt.verify_token(token)?;

        if self.revocations.is_revoked(&claims.jti) {
            return Err(FolioError::Unauthorized("Token revoked".into()));
        }

        Ok(claims)
    }

    /// Revoke a token until it expires
    pub fn logout(&self, token: &str) -> Result<Claims> {
        let claims = self.authenticate(token)?;
        self.revocations.revoke(&claims.jti, claims.exp);
        info!("Logout: {}", claims.sub);
        Ok(claims)
    }

    /// Exchange a valid token for a fresh one; the old token is revoked
    pub fn refresh(&self, token: &str) -> Result<IssuedToken> {
        let claims = self.authenticate(token)?;
        let issued = self.jwt.generate_token(&claims.user())?;
        self.revocations.revoke(&claims.jti, claims.exp);
        Ok(issued)
    }
}

fn placeholder_user(email: &str) -> User {
    let email = email.trim();
    let name = email.split('@').next().unwrap_or(email).to_string();
    User {
        name,
        email: email.to_string(),
        role: DEV_ROLE.to_string(),
    }
}
