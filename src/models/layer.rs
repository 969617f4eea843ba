//! Settings layer model
//!
//! A layer maps setting keys to values. Optional layers are backed by a
//! document on disk; the built-in default layer is not.

use crate::models::value::SettingValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Position of a layer in the resolution stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Next to the running binary, highest precedence
    Local,
    /// Per-user data directory
    Shared,
    /// Compiled-in baseline, always last
    Default,
}

impl LayerKind {
    /// Optional layers in precedence order
    pub const OPTIONAL: [LayerKind; 2] = [LayerKind::Local, LayerKind::Shared];

    pub fn is_optional(&self) -> bool {
        !matches!(self, LayerKind::Default)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Local => "local",
            LayerKind::Shared => "shared",
            LayerKind::Default => "default",
        };
        f.write_str(name)
    }
}

impl FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(LayerKind::Local),
            "shared" => Ok(LayerKind::Shared),
            "default" => Ok(LayerKind::Default),
            _ => Err(format!("Invalid layer: {}", s)),
        }
    }
}

/// Ordered key/value mapping, optionally backed by a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    entries: BTreeMap<String, SettingValue>,
    path: Option<PathBuf>,
}

impl Layer {
    /// Create an empty layer with no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty layer backed by `path`
    pub fn backed_by(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: BTreeMap::new(),
            path: Some(path.into()),
        }
    }

    pub fn from_entries(entries: BTreeMap<String, SettingValue>) -> Self {
        Self {
            entries,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or update `key`, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: SettingValue) -> Option<SettingValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SettingValue> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &BTreeMap<String, SettingValue> {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = (&'a String, &'a SettingValue);
    type IntoIter = btree_map::Iter<'a, String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, SettingValue)> for Layer {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}
