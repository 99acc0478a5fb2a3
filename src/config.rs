//! User configuration loaded from `config.toml`.
//!
//! Every field is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::calculator::{DEFAULT_ERROR_TEXT, DEFAULT_PRECISION, MAX_PRECISION};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub keys: KeyBindings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum decimal places in a result.
    pub precision: usize,
    /// Shown in place of the expression when evaluation fails.
    pub error_text: String,
    /// Render results with thousand separators.
    pub group_digits: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            group_digits: false,
        }
    }
}

/// Keys for the control events. Digits, operators and braces are fixed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub clear: Vec<char>,
    pub flip_sign: Vec<char>,
    pub evaluate: Vec<char>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            clear: vec!['c', 'C'],
            flip_sign: vec!['n', '~'],
            evaluate: vec!['=', '\n', '\r'],
        }
    }
}

impl Config {
    /// Default location: `$XDG_CONFIG_HOME/zcalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional and falls
    /// back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.display.precision = config.display.precision.min(MAX_PRECISION);
        Ok(config)
    }
}
