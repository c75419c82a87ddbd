//! POST /api/contact
//!
//! Validates the message and hands it to the configured form relay.

use hyper::Response;
use tracing::{info, warn};

use super::helpers::{error_response, parse_json_body, success_response, BoxBody};
use crate::contact::ContactMessage;
use crate::server::AppState;
use crate::types::FolioError;

pub async fn handle_contact(state: &AppState, body: &[u8]) -> Response<BoxBody> {
    let message: ContactMessage = match parse_json_body(body) {
        Ok(m) => m,
        Err(e) => return error_response(&e),
    };

    let message = match message.validated() {
        Ok(m) => m,
        Err(e) => return error_response(&e),
    };

    let relay = match &state.relay {
        Some(relay) => relay,
        None => {
            return error_response(&FolioError::Unavailable(
                "Contact form is not configured".into(),
            ))
        }
    };

    match relay.submit(&message).await {
        Ok(()) => {
            info!("Contact message relayed from {}", message.email);
            success_response("Message sent")
        }
        Err(e) => {
            warn!("Contact relay failed: {}", e);
            let err = match e {
                FolioError::Relay(_) => e,
                other => FolioError::Relay(other.to_string()),
            };
            error_response(&err)
        }
    }
}
