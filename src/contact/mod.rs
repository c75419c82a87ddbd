//! Contact form
//!
//! Messages are validated here and handed to a [`FormRelay`] for delivery.

pub mod relay;

pub use relay::{FormRelay, FormSubmitRelay, RelayConfig};

use serde::{Deserialize, Serialize};

use crate::types::{FolioError, Result};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_MESSAGE_LEN: usize = 5000;

/// A visitor's message from the contact page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Trimmed copy of the message, rejected if any field is unusable
    pub fn validated(&self) -> Result<Self> {
        let msg = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        let mut missing = Vec::new();
        if msg.name.is_empty() {
            missing.push("name");
        }
        if msg.email.is_empty() {
            missing.push("email");
        }
        if msg.message.is_empty() {
            missing.push("message");
        }
        if !missing.is_empty() {
            return Err(FolioError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        check_len("name", &msg.name, MAX_NAME_LEN)?;
        check_len("email", &msg.email, MAX_EMAIL_LEN)?;
        check_len("message", &msg.message, MAX_MESSAGE_LEN)?;

        if !is_plausible_email(&msg.email) {
            return Err(FolioError::BadRequest("Invalid email address".into()));
        }

        Ok(msg)
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(FolioError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, email: &str, body: &str) -> ContactMessage {
        ContactMessage {
            name: name.into(),
            email: email.into(),
            message: body.into(),
        }
    }

    #[test]
    fn test_valid_message_is_trimmed() {
        let msg = message("  Ada ", " ada@example.com ", " Hello there ")
            .validated()
            .unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
        assert_eq!(msg.message, "Hello there");
    }

    #[test]
    fn test_missing_fields_listed() {
        let err = message(" ", "", "hi").validated().unwrap_err();
        match err {
            FolioError::BadRequest(msg) => assert!(msg.contains("name, email")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("ada"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada@localhost"));
        assert!(!is_plausible_email("ada@example..com"));
        assert!(!is_plausible_email("a da@example.com"));
        assert!(!is_plausible_email("a@b@c.com"));
    }

    #[test]
    fn test_message_too_long() {
        let body = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(message("Ada", "ada@example.com", &body).validated().is_err());
    }
}
