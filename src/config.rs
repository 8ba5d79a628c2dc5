// filepath: src/config.rs
//! Configuration handling for xbanish
//!
//! Settings are read once at startup from a TOML file. Nothing is ever
//! written back.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BanishConfig {
    /// Log every event and what it did
    pub debug: bool,

    /// env_logger filter used when RUST_LOG is unset
    pub log_filter: Option<String>,

    /// X display to connect to instead of $DISPLAY
    pub display: Option<String>,
}

impl BanishConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("xbanish")
        } else {
            PathBuf::from(".config/xbanish")
        };

        config_dir.join("config.toml")
    }

    /// Load the configuration file, returning default if not found
    pub fn load_from_file() -> Result<Self> {
        Self::load_from_path(&Self::get_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether event diagnostics are on, from `-d` or the file
    pub fn debug_enabled(&self, debug_flag: bool) -> bool {
        debug_flag || self.debug
    }

    /// Default log filter, before RUST_LOG is consulted. With diagnostics
    /// on, the crate's own debug output is always included.
    pub fn log_filter(&self, debug_flag: bool) -> String {
        let debug = self.debug_enabled(debug_flag);
        match &self.log_filter {
            Some(filter) if debug => format!("{},{}=debug", filter, env!("CARGO_CRATE_NAME")),
            Some(filter) => filter.clone(),
            None if debug => "debug".to_string(),
            None => "warn".to_string(),
        }
    }
}
