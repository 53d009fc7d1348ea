// Entry Settings Engine
// Loads, saves, updates and resets tab entry tunables.
// Settings are stored as a JSON file at a caller-chosen path.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::types::errors::SettingsError;
use crate::types::settings::EntrySettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<EntrySettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &EntrySettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &Path;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: PathBuf,
    settings: EntrySettings,
}

impl SettingsEngine {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: EntrySettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed one is a serialization error.
    fn load(&mut self) -> Result<EntrySettings, SettingsError> {
        self.settings = match fs::read_to_string(&self.config_path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                SettingsError::SerializationError(format!(
                    "Malformed entry settings in {}: {}",
                    self.config_path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "No entry settings at {}, using defaults",
                    self.config_path.display()
                );
                EntrySettings::default()
            }
            Err(e) => {
                return Err(SettingsError::IoError(format!(
                    "Cannot read {}: {}",
                    self.config_path.display(),
                    e
                )))
            }
        };
        Ok(self.settings.clone())
    }

    /// Writes the settings to a sibling temp file and renames it into place,
    /// so a reader never sees a half-written file.
    fn save(&self) -> Result<(), SettingsError> {
        let json = serde_json::to_vec_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;

        let io_err = |e: std::io::Error| {
            SettingsError::IoError(format!("Cannot write {}: {}", self.config_path.display(), e))
        };
        if let Some(dir) = self.config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let staging = self.config_path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(io_err)?;
        fs::rename(&staging, &self.config_path).map_err(io_err)?;

        log::debug!("Saved entry settings to {}", self.config_path.display());
        Ok(())
    }

    fn get_settings(&self) -> &EntrySettings {
        &self.settings
    }

    /// Updates one setting by field name and saves immediately.
    ///
    /// The value is validated by deserializing the patched settings back into
    /// `EntrySettings`.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
        }

        let new_settings: EntrySettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.settings = new_settings;
        self.save()
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = EntrySettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
