//! Built-in default layer

use crate::config::codec;
use crate::models::Layer;
use crate::{Result, SettingsError};

const DEFAULTS_DOCUMENT: &str = include_str!("../../resources/defaults.toml");

/// Build the immutable default layer from the compiled-in document
pub fn builtin_defaults() -> Result<Layer> {
    let entries = codec::parse_document(DEFAULTS_DOCUMENT).map_err(SettingsError::InvalidDefaults)?;
    Ok(Layer::from_entries(entries))
}

/// The compiled-in defaults document as shipped
pub fn defaults_document() -> &'static str {
    DEFAULTS_DOCUMENT
}
