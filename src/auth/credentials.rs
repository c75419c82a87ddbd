//! Credential store
//!
//! Users are loaded from a JSON file. Each record carries an Argon2id PHC
//! hash produced by `folio-hash-password`; plaintext passwords are never
//! stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::password::verify_password;
use crate::types::{FolioError, Result};

/// Public user profile, as exposed by the session endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Stored user record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    /// Argon2 password hash
    pub password_hash: String,
    /// Whether the account may log in
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl UserRecord {
    pub fn user(&self) -> User {
        User {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Lookup table from normalized e-mail to user record
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl CredentialStore {
    pub fn from_records(records: Vec<UserRecord>) -> Self {
        let mut users = HashMap::new();
        for record in records {
            let key = normalize(&record.email);
            if users.insert(key, record).is_some() {
                warn!("Duplicate user entry in credential store; keeping the last one");
            }
        }
        Self { users }
    }

    /// Load user records from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FolioError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let records: Vec<UserRecord> = serde_json::from_str(&raw).map_err(|e| {
            FolioError::Storage(format!("Invalid credential store {}: {}", path.display(), e))
        })?;

        let store = Self::from_records(records);
        info!("Credential store loaded: {} user(s)", store.len());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Verify credentials and return the matching user.
    ///
    /// Unknown users, inactive accounts and wrong passwords all yield the
    /// same error to avoid user enumeration.
    pub fn verify(&self, credentials: &Credentials) -> Result<User> {
        let invalid = || FolioError::Auth("Invalid credentials".into());

        let record = match self.users.get(&normalize(&credentials.email)) {
            Some(record) if record.active => record,
            _ => {
                warn!("Login failed - unknown or inactive user: {}", credentials.email);
                return Err(invalid());
            }
        };

        if !verify_password(&credentials.password, &record.password_hash)? {
            warn!("Login failed - invalid password: {}", credentials.email);
            return Err(invalid());
        }

        Ok(record.user())
    }
}
