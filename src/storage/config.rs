use super::Result;
use crate::error::StorageError;
use crate::notify::card::HaltAction;
use dirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
}

/// Per-app defaults; any of these can be overridden by a CLI flag
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Profile {
    pub package_name: Option<String>,
    pub track: Option<String>,
    pub webhook_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// Wall-clock label used in the announcement text, e.g. "11:00"
    pub announce_time: Option<String>,
    pub card_title: Option<String>,
    #[serde(default)]
    pub halt_actions: Vec<HaltAction>,
}

impl Config {
    pub fn default() -> Self {
        Self {
            default_profile: None,
            profiles: HashMap::new(),
        }
    }

    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|_| StorageError::ConfigSaveFailed)?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;

        let app_config_dir = config_dir.join("rollout-messenger");
        let config_file = app_config_dir.join("config.toml");

        Ok(config_file)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }
}
