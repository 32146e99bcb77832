// src/config/mod.rs
//! User configuration: spectrogram options, analyser levels and the log file.
//!
//! Stored as JSON; every field is optional and falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::spectrogram::SpectrogramOptions;

const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "specscroll.log";

/// dB window mapped onto `[0, 1]` by the row analyser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    pub min_db: f32,
    pub max_db: f32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub spectrogram: SpectrogramOptions,
    pub analyzer: AnalyzerSettings,
    /// Where tracing output goes; next to the config file when unset.
    pub log_file: Option<PathBuf>,
}

/// `$XDG_CONFIG_HOME/specscroll`, else `~/.config/specscroll`.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(dir).join("specscroll")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config").join("specscroll")
    } else {
        PathBuf::from(".specscroll")
    }
}

impl AppConfig {
    /// Read the default config file, falling back to defaults when it is
    /// missing or malformed.
    pub fn load_or_default() -> Self {
        let path = config_dir().join(CONFIG_FILE_NAME);
        Self::load_from_disk(&path).unwrap_or_default()
    }

    /// Read an explicitly requested config file. Unlike
    /// [`load_or_default`](Self::load_or_default) a missing or broken file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir().join(LOG_FILE_NAME))
    }

    fn load_from_disk(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match Self::from_json(&contents) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!("[config] failed to parse {path:?}: {err}");
                None
            }
        }
    }
}
