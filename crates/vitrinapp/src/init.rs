//! # Data Directory Resolution
//!
//! A vitrin catalog lives in a `.vitrin/` directory, like `.git/`. Commands run
//! from anywhere inside the project find it by walking up.
//!
//! ## Resolution Order
//!
//! [`initialize`] picks the data directory as follows:
//! 1. An explicit `data_override` (the `--data-dir` flag). A path not named
//!    `.vitrin` gets `.vitrin` appended.
//! 2. A `data_dir` setting other than the default (usually `VITRIN_DATA_DIR`),
//!    relative to `cwd`.
//! 3. The nearest ancestor of `cwd` holding a `.vitrin` directory, see
//!    [`find_project_root`].
//! 4. `cwd/.vitrin`, created on the first write.
//!
//! The project `vitrin.toml` is read from the directory found by steps 1, 3 or 4.

use crate::api::VitrinApi;
use crate::config::VitrinConfig;
use crate::error::Result;
use crate::store::fs::FileStore;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_NAME: &str = ".vitrin";

pub struct VitrinContext {
    pub api: VitrinApi<FileStore>,
    pub config: VitrinConfig,
    pub data_dir: PathBuf,
}

/// Walks up from `cwd` looking for a directory that contains `.vitrin`.
/// Stops at the home directory or the filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(DATA_DIR_NAME).is_dir() {
            return Some(current);
        }
        if home_dir.as_ref() == Some(&current) {
            return None;
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return None,
        }
    }
}

pub fn initialize(cwd: &Path, data_override: Option<PathBuf>) -> Result<VitrinContext> {
    let explicit = data_override.is_some();
    let project_dir = match data_override {
        Some(path) if path.file_name().is_some_and(|name| name == DATA_DIR_NAME) => path,
        Some(path) => path.join(DATA_DIR_NAME),
        None => find_project_root(cwd)
            .map(|root| root.join(DATA_DIR_NAME))
            .unwrap_or_else(|| cwd.join(DATA_DIR_NAME)),
    };

    let config = VitrinConfig::load(Some(&project_dir))?;
    let data_dir = if !explicit && config.data_dir != DATA_DIR_NAME {
        cwd.join(&config.data_dir)
    } else {
        project_dir
    };
    debug!(data_dir = %data_dir.display(), "data directory resolved");

    let api = VitrinApi::new(FileStore::new(data_dir.clone()), config.clone());
    Ok(VitrinContext {
        api,
        config,
        data_dir,
    })
}
