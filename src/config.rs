use crate::state::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// View mode the browser starts in
    #[serde(default)]
    pub view_mode: ViewMode,

    #[serde(default = "default_true")]
    pub sidebar: bool,

    /// Custom theme JSON loaded instead of the built-in named themes
    #[serde(default)]
    pub theme_file: Option<PathBuf>,

    /// Log destination; the terminal owns stdout, so logs need a file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            view_mode: ViewMode::default(),
            sidebar: true,
            theme_file: None,
            log_file: None,
        }
    }
}

impl Config {
    pub const FILENAME: &'static str = "config.json";

    /// Default config path in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tdrive").join(Self::FILENAME))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.as_ref().display(), e)))?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// A missing file is the normal first-run case; a present but broken
    /// file is an error the caller surfaces.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config = Self::load_from_file(path)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render the effective configuration as pretty JSON
    pub fn dump(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
