//! Runtime creation and removal of the optional layers
//!
//! Removing a layer deletes its document and drops it from the stack, but
//! the values it contributed stay in the live view until they are written
//! again or the process restarts.

use crate::models::{Layer, LayerKind};
use crate::services::store::SettingsStore;
use crate::Result;
use tracing::{debug, info};

impl SettingsStore {
    /// Start using a document next to the binary as the top layer
    ///
    /// Values from the shared and default layers are not copied into it;
    /// keys it does not define keep falling through at read time.
    pub fn create_local(&mut self) -> Result<()> {
        self.create_layer(LayerKind::Local)
    }

    /// Start using the per-user shared document
    pub fn create_shared(&mut self) -> Result<()> {
        self.create_layer(LayerKind::Shared)
    }

    /// Delete the local document and stop using it
    pub fn remove_local(&mut self) -> Result<()> {
        self.remove_layer(LayerKind::Local)
    }

    /// Delete the shared document and stop using it
    pub fn remove_shared(&mut self) -> Result<()> {
        self.remove_layer(LayerKind::Shared)
    }

    fn create_layer(&mut self, kind: LayerKind) -> Result<()> {
        if self.is_active(kind) {
            debug!(layer = %kind, "Settings layer already active");
            return Ok(());
        }
        let Some(path) = self.paths.path_for(kind).map(|path| path.to_path_buf()) else {
            return Ok(());
        };

        self.codec.create_empty(&path)?;
        let layer = self.codec.load(&path);

        // Values shadowed by a higher-precedence layer stay hidden
        let shadowing = match kind {
            LayerKind::Shared => self.local.as_ref(),
            _ => None,
        };
        for (key, value) in &layer {
            if shadowing.map_or(true, |upper| !upper.contains_key(key)) {
                self.live.insert(key.clone(), value.clone());
            }
        }

        info!(layer = %kind, path = %path.display(), entries = layer.len(), "Settings layer created");
        if let Some(slot) = self.slot_mut(kind) {
            *slot = Some(layer);
        }
        Ok(())
    }

    fn remove_layer(&mut self, kind: LayerKind) -> Result<()> {
        if let Some(path) = self.document_path(kind) {
            self.codec.delete(&path)?;
        }
        if let Some(slot) = self.slot_mut(kind) {
            *slot = None;
        }

        info!(layer = %kind, "Settings layer removed");
        Ok(())
    }

    fn slot_mut(&mut self, kind: LayerKind) -> Option<&mut Option<Layer>> {
        match kind {
            LayerKind::Local => Some(&mut self.local),
            LayerKind::Shared => Some(&mut self.shared),
            LayerKind::Default => None,
        }
    }
}
