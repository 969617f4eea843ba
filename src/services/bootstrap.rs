use crate::config::{LayerCodec, SettingsPaths};
use crate::models::Layer;
use crate::services::store::SettingsStore;
use crate::Result;
use tracing::{debug, info, instrument};

/// Establishes the initial layer stack
///
/// Runs once per process: makes sure the shared directory exists, creates an
/// empty shared document when no document exists at all (the local one is
/// never created implicitly), then loads whatever documents are present.
pub struct LayerBootstrapper {
    paths: SettingsPaths,
    codec: LayerCodec,
}

impl LayerBootstrapper {
    pub fn new(paths: SettingsPaths) -> Self {
        Self {
            paths,
            codec: LayerCodec::default(),
        }
    }

    pub fn with_codec(mut self, codec: LayerCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Build the store on top of `defaults`
    ///
    /// Failing to create the shared directory or the initial shared document
    /// is fatal. Corrupt documents are not: they load as empty layers.
    #[instrument(skip_all)]
    pub fn bootstrap(self, defaults: Layer) -> Result<SettingsStore> {
        crate::trace_performance!("bootstrap_settings", {
            if let Some(shared_dir) = self.paths.shared.parent() {
                self.codec.ensure_directory_exists(shared_dir)?;
            }

            if !self.paths.local.exists() && !self.paths.shared.exists() {
                info!(
                    path = %self.paths.shared.display(),
                    "No settings documents found, creating shared document"
                );
                self.codec.create_empty(&self.paths.shared)?;
            }

            let local = self
                .paths
                .local
                .exists()
                .then(|| self.codec.load(&self.paths.local));
            let shared = self
                .paths
                .shared
                .exists()
                .then(|| self.codec.load(&self.paths.shared));

            debug!(
                local = local.is_some(),
                shared = shared.is_some(),
                defaults = defaults.len(),
                "Settings layers established"
            );

            Ok(SettingsStore::from_layers(
                defaults,
                local,
                shared,
                self.paths,
                self.codec,
            ))
        })
    }
}
