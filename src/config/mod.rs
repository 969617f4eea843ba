//! Settings documents: file locations, TOML codec and built-in defaults

pub mod codec;
pub mod defaults;
pub mod paths;

pub use codec::{parse_document, render_document, CodecConfig, LayerCodec};
pub use defaults::{builtin_defaults, defaults_document};
pub use paths::{SettingsPaths, APP_DIR_NAME, SETTINGS_FILENAME};
