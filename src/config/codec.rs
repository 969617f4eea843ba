//! TOML persistence for settings layers
//!
//! A settings document is a flat TOML table mapping setting keys to values.
//! Loading never fails: a document that cannot be read or parsed yields an
//! empty layer so a corrupted file behaves like a fresh install.

use crate::models::{Layer, SettingValue};
use crate::{Result, SettingsError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a settings document into its entries
pub fn parse_document(content: &str) -> std::result::Result<BTreeMap<String, SettingValue>, toml::de::Error> {
    toml::from_str(content)
}

/// Render a layer as an indented document with keys in sorted order
pub fn render_document(layer: &Layer) -> Result<String> {
    Ok(toml::to_string_pretty(layer.entries())?)
}

#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Write to a sibling temporary file and rename it over the target
    pub atomic_writes: bool,
    /// Unix permission bits applied to written documents
    pub file_permissions: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            atomic_writes: true,
            file_permissions: 0o600, // Read/write for owner only
        }
    }
}

/// Reads and writes settings documents
#[derive(Debug, Clone, Default)]
pub struct LayerCodec {
    config: CodecConfig,
}

impl LayerCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Load the document at `path`, falling back to an empty layer
    pub fn load(&self, path: &Path) -> Layer {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable settings document, using empty layer");
                return Layer::backed_by(path);
            }
        };

        match parse_document(&content) {
            Ok(entries) => {
                debug!(path = %path.display(), entries = entries.len(), "Loaded settings layer");
                Layer::from_entries(entries).with_path(path)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Corrupt settings document, using empty layer");
                Layer::backed_by(path)
            }
        }
    }

    /// Write every entry of `layer` to `path`
    pub fn save(&self, layer: &Layer, path: &Path) -> Result<()> {
        let content = render_document(layer)?;
        self.ensure_parent_exists(path)?;
        self.write_file_atomic(path, &content)?;

        debug!(path = %path.display(), entries = layer.len(), "Saved settings layer");
        Ok(())
    }

    /// Create an empty document at `path` unless one already exists
    pub fn create_empty(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        self.ensure_parent_exists(path)?;
        fs::File::create(path).map_err(|e| SettingsError::io(path, e))?;
        self.apply_permissions(path)?;

        debug!(path = %path.display(), "Created empty settings document");
        Ok(())
    }

    /// Delete the document at `path` if present
    pub fn delete(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(path).map_err(|e| SettingsError::io(path, e))?;
        debug!(path = %path.display(), "Deleted settings document");
        Ok(())
    }

    /// Create `dir` and its parents; a no-op when it already exists
    pub fn ensure_directory_exists(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| SettingsError::io(dir, e))?;
        }
        Ok(())
    }

    fn ensure_parent_exists(&self, path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.ensure_directory_exists(parent),
            _ => Ok(()),
        }
    }

    fn write_file_atomic(&self, file_path: &Path, content: &str) -> Result<()> {
        let target = if self.config.atomic_writes {
            file_path.with_extension("tmp")
        } else {
            file_path.to_path_buf()
        };

        fs::write(&target, content).map_err(|e| SettingsError::io(&target, e))?;

        let result = self.apply_permissions(&target).and_then(|()| {
            if self.config.atomic_writes {
                fs::rename(&target, file_path).map_err(|e| SettingsError::io(file_path, e))?;
            }
            Ok(())
        });

        if result.is_err() && self.config.atomic_writes {
            if let Err(e) = fs::remove_file(&target) {
                warn!(path = %target.display(), error = %e, "Could not remove temporary settings file");
            }
        }
        result
    }

    #[cfg(unix)]
    fn apply_permissions(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let permissions = fs::Permissions::from_mode(self.config.file_permissions);
        fs::set_permissions(path, permissions).map_err(|e| SettingsError::io(path, e))
    }

    #[cfg(not(unix))]
    fn apply_permissions(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}
