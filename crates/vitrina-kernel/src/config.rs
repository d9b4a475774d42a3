//! Configuration loaded from `vitrina.toml`.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```toml
//! [analyzer]
//! words_per_minute = 220
//!
//! [import]
//! marker = "[TODO]"
//!
//! [clipboard]
//! path = "/tmp/vitrina-clipboard.json"
//!
//! [log]
//! filter = "vitrina=debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrina_codec::ImportOptions;

use crate::analyzer::AnalyzerConfig;
use crate::error::Result;

const APP_DIR: &str = "vitrina";
const CONFIG_FILE: &str = "vitrina.toml";
const CLIPBOARD_FILE: &str = "clipboard.json";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrinaConfig {
    pub analyzer: AnalyzerConfig,
    pub import: ImportOptions,
    pub clipboard: ClipboardConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Slot file; `None` means the per-user data directory.
    pub path: Option<PathBuf>,
}

impl ClipboardConfig {
    /// Configured path, else the default location (if the platform has one).
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(default_clipboard_path)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// `$XDG_CONFIG_HOME/vitrina/vitrina.toml` (or the platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
}

/// `$XDG_DATA_HOME/vitrina/clipboard.json` (or the platform equivalent).
pub fn default_clipboard_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_DIR).join(CLIPBOARD_FILE))
}

impl VitrinaConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from an explicit path, else the default location if it exists,
    /// else defaults. An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            debug!(path = %path.display(), "loading config");
            let text = std::fs::read_to_string(path)?;
            return Self::from_toml(&text);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading config");
                let text = std::fs::read_to_string(&path)?;
                Self::from_toml(&text)
            }
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
