//! Settings resolution and layer management

pub mod bootstrap;
pub mod lifecycle;
pub mod store;

pub use bootstrap::LayerBootstrapper;
pub use store::{SettingsStore, SubscriptionId};
