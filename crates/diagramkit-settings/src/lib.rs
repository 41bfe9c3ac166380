//! DiagramKit Settings Crate
//!
//! Handles engine configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{AnimationSettings, Config, HistorySettings, ReconciliationSettings, ZoomSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
