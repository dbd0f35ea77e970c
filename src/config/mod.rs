//! Configuration Module
//!
//! Handles client settings and layered configuration loading.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ClientSettings, SettingsOverlay};
