//! Session state: the theme preference and the per-request auth context

pub mod auth_context;
pub mod preferences;
pub mod theme;

pub use auth_context::{AuthContext, AuthState, SessionView};
pub use preferences::{PreferenceStore, Preferences};
pub use theme::{Theme, ThemeContext};
