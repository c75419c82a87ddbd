//! Revoked token list
//!
//! Logout records the token id until the token would have expired anyway.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::jwt::unix_now;

/// Token ids revoked before their expiry
#[derive(Debug, Default)]
pub struct RevocationList {
    /// jti -> exp (Unix seconds)
    revoked: DashMap<String, u64>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, jti: &str, exp: u64) {
        self.revoked.insert(jti.to_string(), exp);
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.contains_key(jti)
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }

    /// Drop entries whose token has expired; returns how many were removed
    pub fn purge_expired(&self, now: u64) -> usize {
        let before = self.revoked.len();
        self.revoked.retain(|_, exp| *exp > now);
        before.saturating_sub(self.revoked.len())
    }
}

/// Periodically purge expired revocations
pub fn spawn_cleanup_task(list: Arc<RevocationList>, interval: Duration) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let removed = list.purge_expired(unix_now());
            if removed > 0 {
                debug!("Revocation cleanup: removed {} expired entries", removed);
            }
        }
    });
    info!("Revocation cleanup task started");
}
