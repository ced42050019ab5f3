//! User configuration loaded from `config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::storage::{ensure_extension, CSV_EXTENSION};

const CONFIG_DIR_NAME: &str = "karteikarten";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StudyConfig {
    /// Directory that relative deck names resolve against; the file chooser
    /// starts here
    pub deck_dir: PathBuf,
    /// Deck name prefilled on the creation screen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_deck: Option<String>,
    /// Show every file in the chooser instead of only `.csv` files
    pub show_all_files: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            deck_dir: PathBuf::from("."),
            default_deck: None,
            show_all_files: false,
        }
    }
}

impl StudyConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from an explicit path, or the default location if none is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Ok(path) => Self::load(&path),
                Err(ConfigError::ConfigDirNotFound) => Ok(Self::default()),
                Err(e) => Err(e),
            },
        }
    }

    /// Resolve a deck name typed by the user to a `.csv` path
    pub fn deck_path(&self, name: &str) -> PathBuf {
        let name = ensure_extension(name.trim(), CSV_EXTENSION);
        let path = PathBuf::from(name);
        if path.is_absolute() {
            path
        } else {
            self.deck_dir.join(path)
        }
    }
}
