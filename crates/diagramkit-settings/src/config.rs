//! Configuration for DiagramKit
//!
//! Supports JSON and TOML files, chosen by file extension. Configuration is
//! organized into sections:
//! - Reconciliation (bounds comparison tolerance)
//! - Zoom (wheel sensitivity)
//! - Animation (transition duration)
//! - History (undo depth, fit padding)

use diagramkit_core::constants::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_BOUNDS_TOLERANCE, DEFAULT_FIT_PADDING,
    DEFAULT_HISTORY_DEPTH, DEFAULT_WHEEL_ZOOM_SENSITIVITY,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Bounds reconciliation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationSettings {
    /// Measured bounds within this distance of the model bounds count as equal
    pub tolerance: f64,
}

impl Default for ReconciliationSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_BOUNDS_TOLERANCE,
        }
    }
}

/// Wheel zoom settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Zoom factor per wheel event is `exp(-delta_y * wheel_sensitivity)`
    pub wheel_sensitivity: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            wheel_sensitivity: DEFAULT_WHEEL_ZOOM_SENSITIVITY,
        }
    }
}

/// Animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Duration of animated viewport transitions
    pub duration_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ANIMATION_DURATION_MS,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum undoable entries (0 = unbounded)
    pub max_depth: usize,
    /// Padding fraction used by fit-to-screen
    pub fit_padding: f64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub reconciliation: ReconciliationSettings,
    pub zoom: ZoomSettings,
    pub animation: AnimationSettings,
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/diagramkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::Config(ConfigError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        })?;
        Ok(dir.join("diagramkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let tolerance = self.reconciliation.tolerance;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(SettingsError::invalid(
                "reconciliation.tolerance",
                "must be a finite value >= 0",
            ));
        }

        let sensitivity = self.zoom.wheel_sensitivity;
        if !(sensitivity.is_finite() && sensitivity > 0.0) {
            return Err(SettingsError::invalid(
                "zoom.wheel_sensitivity",
                "must be a finite value > 0",
            ));
        }

        let padding = self.history.fit_padding;
        if !(0.0..0.5).contains(&padding) {
            return Err(SettingsError::invalid(
                "history.fit_padding",
                "must be in [0, 0.5)",
            ));
        }

        Ok(())
    }
}
