//! User settings from `config.toml`
//!
//! ```toml
//! strict = "error"
//! deviceconfig = "~/lab/device.conf"
//! jobs = 4
//! noop = false
//! ```
//!
//! Every setting can be overridden on the command line.

use crate::paths;
use anyhow::{Context, Result};
use declarative::StrictnessLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Strictness applied when a device returns non-canonical values
    pub strict: Option<StrictnessLevel>,
    /// Device config location; `~` and `$VAR` are expanded
    pub deviceconfig: Option<String>,
    /// Resources reconciled concurrently per device
    pub jobs: Option<usize>,
    /// Report changes without applying them
    pub noop: bool,
}

impl Settings {
    /// Load settings from the config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::settings_file()?)
    }

    /// Load settings from a file. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn strict(&self) -> StrictnessLevel {
        self.strict.unwrap_or_default()
    }

    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or(1).max(1)
    }

    /// Device config path: the setting if given, else the config directory default
    pub fn device_config_path(&self) -> Result<PathBuf> {
        match &self.deviceconfig {
            Some(path) => Ok(paths::expand(path)),
            None => paths::device_config_file(),
        }
    }
}
