//! Folio - portfolio content service
//!
//! Folio owns the non-presentational behaviour of a personal portfolio site
//! and exposes it as a JSON API.
//!
//! ## Services
//!
//! - **Catalog**: filtered, ordered, paginated project and blog listings
//! - **Theme**: a persisted light/dark preference
//! - **Session**: credential-verified logins with revocable JWT tokens
//! - **Contact**: validation and relaying of contact form messages

pub mod auth;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod routes;
pub mod server;
pub mod session;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{FolioError, Result};
