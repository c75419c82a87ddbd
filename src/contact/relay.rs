//! Form relay client
//!
//! Delivers contact messages to a form-relay endpoint (formsubmit.co style)
//! as an urlencoded POST carrying the relay's control fields.

use std::time::Duration;
use tracing::{debug, warn};

use super::ContactMessage;
use crate::types::{FolioError, Result};

/// Delivery seam for contact messages (mocked in tests)
#[async_trait::async_trait]
pub trait FormRelay: Send + Sync {
    async fn submit(&self, message: &ContactMessage) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Relay endpoint, e.g. "https://formsubmit.co/me@example.com"
    pub endpoint: String,
    /// `_subject` control field
    pub subject: String,
    pub timeout: Duration,
}

/// HTTP form relay
pub struct FormSubmitRelay {
    config: RelayConfig,
    http_client: reqwest::Client,
}

impl FormSubmitRelay {
    pub fn new(config: RelayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Form fields sent to the relay, user fields first
    pub fn form_fields<'a>(&'a self, message: &'a ContactMessage) -> Vec<(&'static str, &'a str)> {
        vec![
            ("name", message.name.as_str()),
            ("email", message.email.as_str()),
            ("message", message.message.as_str()),
            ("_captcha", "false"),
            ("_subject", self.config.subject.as_str()),
            ("_template", "table"),
        ]
    }
}

#[async_trait::async_trait]
impl FormRelay for FormSubmitRelay {
    async fn submit(&self, message: &ContactMessage) -> Result<()> {
        debug!(endpoint = %self.config.endpoint, "Relaying contact message");

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&self.form_fields(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Form relay rejected message");
            return Err(FolioError::Relay(format!("Relay responded with {status}")));
        }

        Ok(())
    }
}
