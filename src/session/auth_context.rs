//! Per-request session state
//!
//! `AuthContext` is rebuilt from the bearer token on every request and moves
//! between `Anonymous` and `Authenticated` through the `Authority`.

use serde::Serialize;
use std::sync::Arc;

use crate::auth::{Authority, Credentials, IssuedToken, User};
use crate::types::{FolioError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(User),
}

/// Wire shape of the session state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView<'a> {
    pub is_authenticated: bool,
    pub user: Option<&'a User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

pub struct AuthContext {
    authority: Arc<Authority>,
    state: AuthState,
    token: Option<String>,
    expires_at: Option<u64>,
}

impl AuthContext {
    pub fn new(authority: Arc<Authority>) -> Self {
        Self {
            authority,
            state: AuthState::Anonymous,
            token: None,
            expires_at: None,
        }
    }

    /// Rebuild the context from a client-held token.
    ///
    /// No token gives an anonymous context; a bad one is an error.
    pub fn restore(authority: Arc<Authority>, token: Option<&str>) -> Result<Self> {
        let mut ctx = Self::new(authority);
        if let Some(token) = token {
            let claims = ctx.authority.authenticate(token)?;
            ctx.state = AuthState::Authenticated(claims.user());
            ctx.token = Some(token.to_string());
            ctx.expires_at = Some(claims.exp);
        }
        Ok(ctx)
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<IssuedToken> {
        let issued = self.authority.login(credentials)?;
        self.state = AuthState::Authenticated(issued.claims.user());
        self.token = Some(issued.token.clone());
        self.expires_at = Some(issued.claims.exp);
        Ok(issued)
    }

    /// Revoke the held token and drop back to anonymous.
    ///
    /// Logging out of an anonymous context is a no-op.
    pub fn logout(&mut self) -> Result<()> {
        let token = self.token.take();
        self.state = AuthState::Anonymous;
        self.expires_at = None;

        match token {
            Some(token) => self.authority.logout(&token).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Swap the held token for a fresh one
    pub fn refresh(&mut self) -> Result<IssuedToken> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| FolioError::Unauthorized("Not authenticated".into()))?;
        let issued = self.authority.refresh(token)?;
        self.state = AuthState::Authenticated(issued.claims.user());
        self.token = Some(issued.token.clone());
        self.expires_at = Some(issued.claims.exp);
        Ok(issued)
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Anonymous => None,
        }
    }

    /// The user, or 401 for gated resources
    pub fn require_user(&self) -> Result<&User> {
        self.user()
            .ok_or_else(|| FolioError::Unauthorized("Authentication required".into()))
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            is_authenticated: self.is_authenticated(),
            user: self.user(),
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, CredentialStore, JwtValidator, UserRecord};

    fn authority() -> Arc<Authority> {
        let jwt =
            JwtValidator::new("context-test-secret-at-least-32-characters".into(), 600).unwrap();
        let store = CredentialStore::from_records(vec![UserRecord {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: "Admiral".into(),
            password_hash: hash_password("cobol-forever").unwrap(),
            active: true,
        }]);
        Arc::new(Authority::new(jwt, Some(store), false))
    }

    fn creds(password: &str) -> Credentials {
        Credentials {
            email: "grace@example.com".into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let ctx = AuthContext::new(authority());
        assert_eq!(ctx.state(), &AuthState::Anonymous);
        assert!(ctx.require_user().is_err());
    }

    #[test]
    fn test_failed_login_stays_anonymous() {
        let mut ctx = AuthContext::new(authority());
        assert!(ctx.login(&creds("wrong")).is_err());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_login_then_restore_from_token() {
        let authority = authority();
        let mut ctx = AuthContext::new(Arc::clone(&authority));
        let issued = ctx.login(&creds("cobol-forever")).unwrap();
        assert_eq!(ctx.user().map(|u| u.role.as_str()), Some("Admiral"));

        let restored = AuthContext::restore(authority, Some(&issued.token)).unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.user().map(|u| u.name.as_str()), Some("Grace"));
    }

    #[test]
    fn test_logout_rejects_token_afterwards() {
        let authority = authority();
        let mut ctx = AuthContext::new(Arc::clone(&authority));
        let issued = ctx.login(&creds("cobol-forever")).unwrap();

        ctx.logout().unwrap();
        assert!(!ctx.is_authenticated());
        assert!(AuthContext::restore(authority, Some(&issued.token)).is_err());
    }

    #[test]
    fn test_anonymous_logout_is_noop() {
        let mut ctx = AuthContext::restore(authority(), None).unwrap();
        assert!(ctx.logout().is_ok());
    }

    #[test]
    fn test_refresh_revokes_old_token() {
        let authority = authority();
        let mut ctx = AuthContext::new(Arc::clone(&authority));
        let first = ctx.login(&creds("cobol-forever")).unwrap();
        let second = ctx.refresh().unwrap();

        assert_ne!(first.token, second.token);
        assert!(AuthContext::restore(Arc::clone(&authority), Some(&first.token)).is_err());
        assert!(AuthContext::restore(authority, Some(&second.token)).is_ok());
    }

    #[test]
    fn test_view_shape() {
        let ctx = AuthContext::new(authority());
        let json = serde_json::to_value(ctx.view()).unwrap();
        assert_eq!(json["isAuthenticated"], false);
        assert!(json["user"].is_null());
    }
}
