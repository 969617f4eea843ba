//! settingstack - layered settings store
//!
//! Effective settings are resolved across an ordered stack of layers: an
//! optional local layer next to the running binary, an optional shared layer
//! in the per-user data directory, and the immutable built-in defaults. One
//! writable layer is persisted as a TOML document, and observers are told
//! which key changed on every write.

use std::path::{Path, PathBuf};

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod version;

pub use models::*;
pub use services::*;

/// Result type alias for settingstack operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Error types specific to settings resolution and persistence
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Setting key not defined: {0}")]
    KeyUndefined(String),

    #[error("Setting {key} holds a {found} value, expected {expected}")]
    KindMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Built-in defaults are invalid: {0}")]
    InvalidDefaults(#[source] toml::de::Error),

    #[error("Could not determine {0} directory")]
    DirectoryUnavailable(&'static str),
}

impl SettingsError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
