// Smartmark Settings Engine
// Manages backend connection settings: loading, saving, and resetting to defaults.
// Settings are stored as a JSON file; environment variables override file values.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::errors::SettingsError;
use crate::types::settings::BackendSettings;

const ENV_BACKEND_URL: &str = "SMARTMARK_BACKEND_URL";
const ENV_API_KEY: &str = "SMARTMARK_API_KEY";
const ENV_SITE_ORIGIN: &str = "SMARTMARK_SITE_ORIGIN";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BackendSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BackendSettings;
    fn reset(&mut self);
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists backend settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BackendSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise uses `$XDG_CONFIG_HOME/smartmark/settings.json`, falling back
    /// to `$HOME/.config/smartmark/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => default_config_path().to_string_lossy().to_string(),
        };

        Self {
            config_path,
            settings: BackendSettings::default(),
        }
    }

    /// Applies environment-variable overrides on top of loaded settings.
    fn apply_env_overrides(settings: &mut BackendSettings) {
        if let Ok(url) = env::var(ENV_BACKEND_URL) {
            settings.backend_url = url;
        }
        if let Ok(key) = env::var(ENV_API_KEY) {
            settings.api_key = key;
        }
        if let Ok(origin) = env::var(ENV_SITE_ORIGIN) {
            settings.site_origin = origin;
        }
    }
}

fn default_config_path() -> PathBuf {
    let config_dir = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|_| PathBuf::from("."));
    config_dir.join("smartmark").join("settings.json")
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, starts from defaults. Environment overrides
    /// are applied in either case. A malformed file is a serialization error.
    fn load(&mut self) -> Result<BackendSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        let mut settings = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;
            serde_json::from_str(&content).map_err(|e| {
                SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
            })?
        } else {
            BackendSettings::default()
        };

        Self::apply_env_overrides(&mut settings);
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn reset(&mut self) {
        self.settings = BackendSettings::default();
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
