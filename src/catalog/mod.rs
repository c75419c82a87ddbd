//! Project and blog catalog
//!
//! Provides:
//! - Fixture records (`Project`, `BlogPost`)
//! - The filter engine (selection, featured, search, pagination)
//! - The in-memory store with detail and related-item lookups

pub mod filter;
pub mod models;
pub mod store;

pub use filter::{apply_filters, filter_blogs, filter_projects, paginate, FilterState, Page, ALL};
pub use models::{BlogPost, CatalogItem, Project};
pub use store::{Catalog, CatalogView, RELATED_LIMIT};
