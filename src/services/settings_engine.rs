// autoplay-sync settings: `settings.json` in the platform config directory,
// or a path given on the command line.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::SyncSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<SyncSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &SyncSettings;
    fn get_settings_mut(&mut self) -> &mut SyncSettings;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: SyncSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: SyncSettings::default(),
        }
    }

    fn read_file(path: &Path) -> Result<Option<SyncSettings>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SettingsError::SerializationError(format!("{}: {}", path.display(), e)))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads and validates the settings file.
    ///
    /// A missing file yields defaults. Fields absent from the file take their
    /// default values.
    fn load(&mut self) -> Result<SyncSettings, SettingsError> {
        let settings = Self::read_file(Path::new(&self.config_path))?.unwrap_or_default();
        settings.validate()?;
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SettingsError::IoError(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn get_settings(&self) -> &SyncSettings {
        &self.settings
    }

    fn get_settings_mut(&mut self) -> &mut SyncSettings {
        &mut self.settings
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
