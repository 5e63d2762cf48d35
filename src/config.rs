//! Configuration loading from spritefix.toml

use serde::Deserialize;
use sprite_trim::{WriteMode, DEFAULT_SUBDIRS};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "spritefix.toml";

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the sprite variant subdirectories
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Subdirectories of `base_dir` to scan, in order
    #[serde(default = "default_subdirs")]
    pub subdirs: Vec<String>,
    /// Replace files through a temp file + rename instead of truncating in place
    #[serde(default = "default_atomic")]
    pub atomic: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            subdirs: default_subdirs(),
            atomic: default_atomic(),
        }
    }
}

fn default_subdirs() -> Vec<String> {
    DEFAULT_SUBDIRS.iter().map(|s| s.to_string()).collect()
}

fn default_atomic() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.atomic {
            WriteMode::Atomic
        } else {
            WriteMode::InPlace
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    MissingBaseDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::MissingBaseDir => write!(
                f,
                "no base directory: set base_dir in {} or pass --base-dir",
                DEFAULT_CONFIG
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
