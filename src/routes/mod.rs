//! HTTP routes for Folio

pub mod auth_routes;
pub mod catalog;
pub mod contact;
pub mod health;
pub mod helpers;
pub mod profile;
pub mod theme;

pub use auth_routes::{handle_login, handle_logout, handle_me, handle_refresh};
pub use catalog::{handle_get_blog, handle_get_project, handle_list_blogs, handle_list_projects};
pub use contact::handle_contact;
pub use health::{health_check, version_info};
pub use helpers::{
    cors_preflight, error_response, method_not_allowed, not_found_response, read_body, BoxBody,
};
pub use profile::handle_profile;
pub use theme::{handle_get_theme, handle_set_theme, handle_toggle_theme};
