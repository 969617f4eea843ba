//! Locations of the local and shared settings documents

use crate::models::LayerKind;
use crate::{Result, SettingsError};
use std::env;
use std::path::{Path, PathBuf};

/// File name shared by the local and shared documents
pub const SETTINGS_FILENAME: &str = "Settings.toml";

/// Directory name under the per-user data directory
pub const APP_DIR_NAME: &str = "settingstack";

/// Overrides the directory holding the local document
pub const LOCAL_DIR_ENV: &str = "SETTINGSTACK_LOCAL_DIR";

/// Overrides the directory holding the shared document
pub const SHARED_DIR_ENV: &str = "SETTINGSTACK_SHARED_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    /// Document next to the running binary
    pub local: PathBuf,
    /// Document in the per-user data directory
    pub shared: PathBuf,
}

impl SettingsPaths {
    /// Platform locations: the executable's directory and `<data_dir>/settingstack`
    pub fn discover() -> Result<Self> {
        Ok(Self::in_dirs(Self::executable_dir()?, Self::shared_dir()?))
    }

    /// Platform locations, with either directory replaced by its environment override
    pub fn from_env() -> Result<Self> {
        let local_dir = match env_dir(LOCAL_DIR_ENV) {
            Some(dir) => dir,
            None => Self::executable_dir()?,
        };
        let shared_dir = match env_dir(SHARED_DIR_ENV) {
            Some(dir) => dir,
            None => Self::shared_dir()?,
        };
        Ok(Self::in_dirs(local_dir, shared_dir))
    }

    pub fn in_dirs(local_dir: impl AsRef<Path>, shared_dir: impl AsRef<Path>) -> Self {
        Self {
            local: local_dir.as_ref().join(SETTINGS_FILENAME),
            shared: shared_dir.as_ref().join(SETTINGS_FILENAME),
        }
    }

    pub fn with_local_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.local = dir.as_ref().join(SETTINGS_FILENAME);
        self
    }

    pub fn with_shared_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.shared = dir.as_ref().join(SETTINGS_FILENAME);
        self
    }

    /// Document path for an optional layer; the default layer has none
    pub fn path_for(&self, kind: LayerKind) -> Option<&Path> {
        match kind {
            LayerKind::Local => Some(&self.local),
            LayerKind::Shared => Some(&self.shared),
            LayerKind::Default => None,
        }
    }

    pub fn executable_dir() -> Result<PathBuf> {
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .ok_or(SettingsError::DirectoryUnavailable("executable"))
    }

    pub fn shared_dir() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or(SettingsError::DirectoryUnavailable("data"))?
            .join(APP_DIR_NAME);
        Ok(dir)
    }
}

fn env_dir(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
