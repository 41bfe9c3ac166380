//! Settings Persistence
//!
//! Binds a [`Config`] to the file it was loaded from. A missing file is not
//! an error: defaults are used and written on the first save. An unreadable
//! or invalid file falls back to defaults with a warning.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::SettingsResult;

/// Config plus its backing file
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Loads from the platform config location.
    pub fn open_default() -> SettingsResult<Self> {
        Ok(Self::load_or_default(&Config::default_path()?))
    }

    /// Loads `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        let config = if path.exists() {
            match Config::load_from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring config {}: {}", path.display(), e);
                    Config::default()
                }
            }
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Config::default()
        };
        Self {
            config,
            path: path.to_path_buf(),
        }
    }

    /// Writes the current config back to its file.
    pub fn save(&self) -> SettingsResult<()> {
        self.config.save_to_file(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
