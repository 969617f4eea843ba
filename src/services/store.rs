use crate::config::{builtin_defaults, LayerCodec, SettingsPaths};
use crate::models::{Key, Layer, LayerKind, SettingType, SettingValue};
use crate::services::bootstrap::LayerBootstrapper;
use crate::{Result, SettingsError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, trace};

type ChangeListener = Box<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`SettingsStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Resolves settings across the active layers
///
/// Reads come from the live view, the union of every active layer with the
/// higher-precedence value winning. Writes go to every active optional layer
/// and to the live view, so whichever layer is saved holds the current value.
pub struct SettingsStore {
    /// Compiled-in baseline, never mutated
    pub(super) defaults: Layer,
    /// Highest precedence, next to the binary
    pub(super) local: Option<Layer>,
    /// Per-user data directory
    pub(super) shared: Option<Layer>,
    /// Merged view used for reads
    pub(super) live: BTreeMap<String, SettingValue>,
    pub(super) paths: SettingsPaths,
    pub(super) codec: LayerCodec,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
    next_subscription: u64,
}

impl SettingsStore {
    /// Open the store for this process
    ///
    /// Discovers the document locations (honoring the directory overrides in
    /// the environment), builds the default layer and bootstraps the optional
    /// layers. This is the single initialization point; hosts hold on to the
    /// returned store and pass it where it is needed.
    pub fn open() -> Result<Self> {
        let paths = SettingsPaths::from_env()?;
        LayerBootstrapper::new(paths).bootstrap(builtin_defaults()?)
    }

    /// Assemble a store from already loaded layers
    pub fn from_layers(
        defaults: Layer,
        local: Option<Layer>,
        shared: Option<Layer>,
        paths: SettingsPaths,
        codec: LayerCodec,
    ) -> Self {
        let mut live = defaults.entries().clone();
        for layer in [shared.as_ref(), local.as_ref()].into_iter().flatten() {
            merge_entries(&mut live, layer);
        }

        Self {
            defaults,
            local,
            shared,
            live,
            paths,
            codec,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Resolve `key`
    ///
    /// Returns the live value, else the default value, else `fallback`.
    /// A key found nowhere without a fallback is a programming error and
    /// yields [`SettingsError::KeyUndefined`].
    pub fn get(&self, key: &str, fallback: Option<SettingValue>) -> Result<SettingValue> {
        match self.lookup(key) {
            Some(value) => Ok(value.clone()),
            None => fallback.ok_or_else(|| SettingsError::KeyUndefined(key.to_string())),
        }
    }

    /// Resolve `key`, using `fallback` when it is defined nowhere
    pub fn get_or(&self, key: &str, fallback: impl Into<SettingValue>) -> SettingValue {
        self.lookup(key).cloned().unwrap_or_else(|| fallback.into())
    }

    /// Resolve a typed key
    pub fn value<T: SettingType>(&self, key: Key<T>) -> Result<T> {
        let value = self
            .lookup(key.name())
            .ok_or_else(|| SettingsError::KeyUndefined(key.name().to_string()))?;

        T::from_setting(value).ok_or_else(|| SettingsError::KindMismatch {
            key: key.name().to_string(),
            expected: T::KIND,
            found: value.kind(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Write `value` to every active optional layer and the live view
    ///
    /// The value is not checked against the kind previously stored under
    /// `key`. Listeners are called synchronously once the write is visible.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) {
        let value = value.into();

        for layer in [self.local.as_mut(), self.shared.as_mut()].into_iter().flatten() {
            layer.insert(key, value.clone());
        }
        self.live.insert(key.to_string(), value);

        trace!(key, "Setting changed");
        self.notify(key);
    }

    /// Write a typed key
    pub fn set_value<T: SettingType>(&mut self, key: Key<T>, value: T) {
        self.set(key.name(), value.into_setting());
    }

    /// Register a listener called with the key name after every `set`
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Layer that `save` writes: local if active, else shared
    pub fn save_target(&self) -> Option<LayerKind> {
        if self.local.is_some() {
            Some(LayerKind::Local)
        } else if self.shared.is_some() {
            Some(LayerKind::Shared)
        } else {
            None
        }
    }

    /// Persist exactly one layer and return the path written
    ///
    /// With no optional layer active there is nothing to persist and the
    /// call returns `Ok(None)`.
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(kind) = self.save_target() else {
            debug!("No optional layer active, nothing to save");
            return Ok(None);
        };

        let (layer, path) = match self.layer(kind).zip(self.document_path(kind)) {
            Some(target) => target,
            None => return Ok(None),
        };

        crate::trace_performance!("save_settings", { self.codec.save(layer, &path) })?;
        Ok(Some(path))
    }

    /// Active layers, highest precedence first, default layer last
    pub fn layers(&self) -> Vec<(LayerKind, &Layer)> {
        let mut layers = Vec::with_capacity(3);
        if let Some(local) = &self.local {
            layers.push((LayerKind::Local, local));
        }
        if let Some(shared) = &self.shared {
            layers.push((LayerKind::Shared, shared));
        }
        layers.push((LayerKind::Default, &self.defaults));
        layers
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        match kind {
            LayerKind::Local => self.local.as_ref(),
            LayerKind::Shared => self.shared.as_ref(),
            LayerKind::Default => Some(&self.defaults),
        }
    }

    pub fn is_active(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some()
    }

    pub fn defaults(&self) -> &Layer {
        &self.defaults
    }

    pub fn live_view(&self) -> &BTreeMap<String, SettingValue> {
        &self.live
    }

    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    /// Backing path of an optional layer, preferring the path it was loaded from
    pub(super) fn document_path(&self, kind: LayerKind) -> Option<PathBuf> {
        self.layer(kind)
            .and_then(|layer| layer.path())
            .or_else(|| self.paths.path_for(kind))
            .map(|path| path.to_path_buf())
    }

    fn lookup(&self, key: &str) -> Option<&SettingValue> {
        self.live.get(key).or_else(|| self.defaults.get(key))
    }

    fn notify(&self, key: &str) {
        for (_, listener) in &self.listeners {
            listener(key);
        }
    }
}

fn merge_entries(live: &mut BTreeMap<String, SettingValue>, layer: &Layer) {
    live.extend(layer.iter().map(|(key, value)| (key.clone(), value.clone())));
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("local", &self.local.as_ref().map(Layer::len))
            .field("shared", &self.shared.as_ref().map(Layer::len))
            .field("defaults", &self.defaults.len())
            .field("live", &self.live.len())
            .field("paths", &self.paths)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
