//! Configuration management for MAIRE

mod keys;

pub use keys::{Action, ActionGroup, KeyBindings, key_to_string};

use crate::paths;
use crate::topology::Topology;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which backend answers model and run requests
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The external MAIRE HTTP service
    #[default]
    Remote,
    /// The in-process ledger engine with stub models
    Local,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the MAIRE service (the `/maire/...` paths are appended)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Backend used for requests
    #[serde(default)]
    pub backend: BackendKind,

    /// Optional global timeout for HTTP requests, in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Topology selected at startup
    #[serde(default)]
    pub default_topology: Topology,

    /// Number of model slots in the sidebar
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,

    /// How many of the leading slots start enabled
    #[serde(default = "default_enabled_slots")]
    pub enabled_slots: usize,

    /// Poll interval in milliseconds for the event loop
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Keybindings configuration
    #[serde(default)]
    pub keys: KeyBindings,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080".to_string()
}

const fn default_slot_count() -> usize {
    5
}

const fn default_enabled_slots() -> usize {
    3
}

const fn default_poll_interval() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            backend: BackendKind::default(),
            request_timeout_secs: None,
            default_topology: Topology::default(),
            slot_count: default_slot_count(),
            enabled_slots: default_enabled_slots(),
            poll_interval_ms: default_poll_interval(),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        // Ensure any new default keybindings are available
        config.keys.merge_defaults();
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::config_file()
    }

    /// Request timeout as a [`Duration`], if one is configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
