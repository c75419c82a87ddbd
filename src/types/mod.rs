//! Shared types for Folio

mod error;

pub use error::{FolioError, Result};
