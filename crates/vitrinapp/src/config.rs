//! # Configuration
//!
//! Vitrin configuration is a [`confique`] config, loaded in layers.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `VITRIN_DATA_DIR`, `VITRIN_ROOM_FILTER`, etc.
//! 2. **Project Config**: `.vitrin/vitrin.toml` in the data directory.
//! 3. **User Config**: `vitrin.toml` in the OS config directory (via `directories`).
//! 4. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | `.vitrin` | Where `catalog.json` lives, relative to the project root |
//! | `room_filter` | `true` | Whether public search honours the room selection |
//! | `default_locale` | `tr` | Locale used when a request does not name a valid one |
//! | `default_country_code` | `90` | Prefix for national phone numbers |
//!
//! ## CLI Usage
//!
//! - `vitrin config` shows the resolved values.
//! - `vitrin config --template` prints a commented `vitrin.toml`.

use crate::error::{Result, VitrinError};
use crate::normalize::{normalize_locale, Locale};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "vitrin.toml";

/// Configuration for vitrin, stored in `vitrin.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VitrinConfig {
    /// Data directory holding `catalog.json`.
    #[config(default = ".vitrin", env = "VITRIN_DATA_DIR")]
    pub data_dir: String,

    /// Restrict public search results to the selected room configurations.
    #[config(default = true, env = "VITRIN_ROOM_FILTER")]
    pub room_filter: bool,

    /// Fallback locale ("tr" or "en").
    #[config(default = "tr", env = "VITRIN_DEFAULT_LOCALE")]
    pub default_locale: String,

    /// Country calling code added to national phone numbers.
    #[config(default = 90, env = "VITRIN_DEFAULT_COUNTRY_CODE")]
    pub default_country_code: u16,
}

impl Default for VitrinConfig {
    fn default() -> Self {
        Self {
            data_dir: ".vitrin".to_string(),
            room_filter: true,
            default_locale: "tr".to_string(),
            default_country_code: 90,
        }
    }
}

impl VitrinConfig {
    /// Loads environment, then `project_dir/vitrin.toml`, then the user config file.
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = project_dir {
            builder = builder.file(dir.join(CONFIG_FILE));
        }
        if let Some(user) = user_config_file() {
            builder = builder.file(user);
        }
        let config = builder
            .load()
            .map_err(|e| VitrinError::Config(e.to_string()))?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Loads a single file over the compiled defaults, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::builder()
            .file(path)
            .load()
            .map_err(|e| VitrinError::Config(e.to_string()))
    }

    pub fn locale(&self) -> Locale {
        normalize_locale(&self.default_locale, Locale::Tr)
    }

    /// Commented TOML with every key and its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}

pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "vitrin", "vitrin").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
