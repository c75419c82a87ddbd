//! HTTP server for Folio

pub mod http;

pub use http::{run, AppState};
