//! Data models for settingstack

pub mod key;
pub mod keys;
pub mod layer;
pub mod value;

pub use key::*;
pub use layer::*;
pub use value::*;
