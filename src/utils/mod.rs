//! Shared utilities
//! Contains persisted viewer settings.

pub mod settings;

// Re-export commonly used types
pub use settings::{ViewerSettings, load_or_default, load_settings, save_settings};
