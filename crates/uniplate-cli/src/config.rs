//! `uniplate.toml` settings
//!
//! Every value is optional; command-line flags win over the file and the
//! file wins over built-in defaults.
//!
//! ```toml
//! [output]
//! dir = "out"
//! naming = "{surname}_{name}"
//!
//! [table]
//! sheets = ["Class A", "Class B"]
//! skip_empty = true
//!
//! [template]
//! fill_with_last = false
//!
//! [plugins]
//! table_loader = "attestation"
//! templater = "attestation"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::app::Plugin;

/// File looked up in the search directory when no `--config` is given
pub const CONFIG_FILE: &str = "uniplate.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub table: TableSettings,
    pub template: TemplateSettings,
    pub plugins: PluginSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Where and under which names documents are written
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: Option<PathBuf>,
    pub naming: Option<String>,
}

/// Table loading
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct TableSettings {
    /// Sheets to process; empty means all
    pub sheets: Vec<String>,
    pub skip_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct TemplateSettings {
    pub fill_with_last: bool,
}

/// Loader and templater selection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct PluginSettings {
    pub table_loader: Option<Plugin>,
    pub templater: Option<Plugin>,
}

/// Load settings from a config file, or from `uniplate.toml` in
/// `search_dir`, or fall back to defaults
pub fn load_settings(config_path: Option<&Path>, search_dir: &Path) -> Result<Settings> {
    let path = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let candidate = search_dir.join(CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(Settings::default());
            }
            candidate
        }
    };

    debug!("Loading config {}", path.display());
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    Settings::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}
