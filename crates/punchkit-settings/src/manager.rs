//! Settings manager owning the loaded settings and their backing file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{SettingsError, SettingsResult};

/// Owns the application settings and the file they persist to.
///
/// The default backing file lives at
/// `<platform config dir>/punchkit/settings.toml`; an explicit path can
/// be supplied for tests or portable installs.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: Settings,
    path: PathBuf,
}

impl SettingsManager {
    /// Creates a manager with defaults at the platform settings path.
    pub fn new() -> SettingsResult<Self> {
        Ok(Self::with_path(Self::config_file_path()?))
    }

    /// Creates a manager with defaults backed by an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings: Settings::default(),
            path,
        }
    }

    /// The platform settings file path.
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("settings.toml"))
    }

    /// Creates the configuration directory if missing.
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn config_dir() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir())
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })?;
        Ok(base.join("punchkit"))
    }

    /// Loads settings from the backing file.
    ///
    /// A missing file is not an error; it leaves the defaults in place so
    /// first launches work without any setup.
    pub fn load(&mut self) -> SettingsResult<()> {
        if self.path.exists() {
            self.settings = Settings::load_from_file(&self.path)?;
        } else {
            self.settings = Settings::default();
        }
        Ok(())
    }

    /// Saves the current settings, creating parent directories as needed.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.settings.save_to_file(&self.path)
    }

    /// Applies a mutation, clamps the result and persists it in one step.
    pub fn update<F>(&mut self, apply: F) -> SettingsResult<()>
    where
        F: FnOnce(&mut Settings),
    {
        apply(&mut self.settings);
        self.settings.clamp();
        self.save()
    }

    /// Gets the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Gets a mutable reference to the settings.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SettingsManager::with_path(dir.path().join("settings.toml"));
        manager.load().unwrap();
        assert_eq!(manager.settings().panel.length_mm, 1000.0);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("settings.toml");
        let manager = SettingsManager::with_path(path.clone());
        manager.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_update_clamps_before_persisting() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SettingsManager::with_path(dir.path().join("settings.toml"));
        manager
            .update(|s| s.sampling.hole_spacing_mm = -4.0)
            .unwrap();
        assert_eq!(manager.settings().sampling.hole_spacing_mm, 5.0);

        let mut reloaded = SettingsManager::with_path(manager.path().to_path_buf());
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().sampling.hole_spacing_mm, 5.0);
    }

    #[test]
    fn test_config_file_path_ends_with_app_dir() {
        let path = SettingsManager::config_file_path().unwrap();
        assert!(path.ends_with("punchkit/settings.toml"));
    }
}
