//! Command-line interface for settingstack
//!
//! Inspects and edits the layered settings of the current installation:
//! resolving keys, writing values through to the active layers, and creating
//! or removing the optional documents.

use crate::config::{builtin_defaults, SettingsPaths};
use crate::models::{LayerKind, SettingValue};
use crate::services::{LayerBootstrapper, SettingsStore};
use crate::version::crate_version;
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// settingstack command-line interface
#[derive(Parser)]
#[command(name = "settingstack")]
#[command(about = "Inspect and edit layered application settings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct SettingsCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable JSON output for machine-readable results
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the local document (defaults to the executable's directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Directory holding the shared document (defaults to the user data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub shared_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a setting across the active layers
    Get {
        /// Setting key, e.g. "RepeatCount"
        key: String,
    },

    /// Write a setting to every active layer and save
    Set {
        /// Setting key
        key: String,

        /// TOML literal such as `3`, `true`, `"text"` or `{ r = 255, g = 0, b = 0, a = 255 }`;
        /// anything else, including `inf` and `nan`, is stored as plain text
        value: String,
    },

    /// List resolved settings, or the entries of a single layer
    List {
        /// Only show entries stored in this layer (local, shared, default)
        #[arg(short, long)]
        layer: Option<LayerKind>,
    },

    /// Show which layers are active and where they live
    Layers,

    /// Manage the local document next to the executable
    Local(LayerCommands),

    /// Manage the shared document in the user data directory
    Shared(LayerCommands),

    /// Print the version
    Version,
}

#[derive(Args)]
pub struct LayerCommands {
    #[command(subcommand)]
    pub action: LayerAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerAction {
    /// Create the document if absent and start using it
    Create,
    /// Delete the document and stop using it
    Remove,
}

/// Parse a value given on the command line
///
/// Valid TOML literals keep their kind; everything else becomes text, so
/// `set LanguageCode en` works without quoting. The non-finite float
/// literals `inf` and `nan` are also kept as text.
pub fn parse_literal(raw: &str) -> SettingValue {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Literal {
        value: SettingValue,
    }

    match toml::from_str::<Literal>(&format!("value = {}", raw)) {
        Ok(Literal {
            value: SettingValue::Float(f),
        }) if !f.is_finite() => SettingValue::Text(raw.to_string()),
        Ok(literal) => literal.value,
        Err(_) => SettingValue::Text(raw.to_string()),
    }
}

/// Executes commands against an open store
pub struct CliExecutor<W: Write> {
    store: SettingsStore,
    out: W,
    json_output: bool,
}

impl<W: Write> CliExecutor<W> {
    pub fn new(store: SettingsStore, out: W, json_output: bool) -> Self {
        Self {
            store,
            out,
            json_output,
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Get { key } => self.execute_get(&key),
            Commands::Set { key, value } => self.execute_set(&key, &value),
            Commands::List { layer } => self.execute_list(layer),
            Commands::Layers => self.execute_layers(),
            Commands::Local(cmd) => self.execute_layer_action(LayerKind::Local, cmd.action),
            Commands::Shared(cmd) => self.execute_layer_action(LayerKind::Shared, cmd.action),
            Commands::Version => write_version(&mut self.out, self.json_output),
        }
    }

    fn execute_get(&mut self, key: &str) -> anyhow::Result<()> {
        let value = self.store.get(key, None)?;

        if self.json_output {
            let output = json!({ "key": key, "value": value, "kind": value.kind().to_string() });
            writeln!(self.out, "{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            writeln!(self.out, "{}", value)?;
        }
        Ok(())
    }

    fn execute_set(&mut self, key: &str, raw: &str) -> anyhow::Result<()> {
        let value = parse_literal(raw);
        debug!(key, kind = %value.kind(), "Parsed command-line value");

        self.store.set(key, value.clone());
        let saved = self.store.save().context("Failed to save settings")?;

        if self.json_output {
            let output = json!({ "key": key, "value": value, "saved_to": saved });
            writeln!(self.out, "{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            match saved {
                Some(path) => writeln!(self.out, "{} = {} (saved to {})", key, value, path.display())?,
                None => writeln!(self.out, "{} = {} (not persisted, no optional layer active)", key, value)?,
            }
        }
        Ok(())
    }

    fn execute_list(&mut self, layer: Option<LayerKind>) -> anyhow::Result<()> {
        let entries: Vec<(&String, &SettingValue)> = match layer {
            Some(kind) => match self.store.layer(kind) {
                Some(layer) => layer.iter().collect(),
                None => bail!("The {} layer is not active", kind),
            },
            None => self.store.live_view().iter().collect(),
        };

        if self.json_output {
            let map = entries
                .iter()
                .map(|(key, value)| Ok(((*key).clone(), serde_json::to_value(value)?)))
                .collect::<serde_json::Result<serde_json::Map<_, _>>>()?;
            writeln!(self.out, "{}", serde_json::to_string_pretty(&map)?)?;
        } else if entries.is_empty() {
            writeln!(self.out, "No settings found.")?;
        } else {
            for (key, value) in entries {
                writeln!(self.out, "{} = {}", key, value)?;
            }
        }
        Ok(())
    }

    fn execute_layers(&mut self) -> anyhow::Result<()> {
        let kinds = [LayerKind::Local, LayerKind::Shared, LayerKind::Default];

        if self.json_output {
            let layers: Vec<_> = kinds
                .iter()
                .map(|kind| {
                    let layer = self.store.layer(*kind);
                    json!({
                        "layer": kind,
                        "active": layer.is_some(),
                        "path": self.store.paths().path_for(*kind),
                        "entries": layer.map(|layer| layer.len()),
                    })
                })
                .collect();
            writeln!(self.out, "{}", serde_json::to_string_pretty(&layers)?)?;
            return Ok(());
        }

        writeln!(self.out, "Layers (highest precedence first):")?;
        for kind in kinds {
            let status = match self.store.layer(kind) {
                Some(layer) => format!("active, {} entries", layer.len()),
                None => "inactive".to_string(),
            };
            match self.store.paths().path_for(kind) {
                Some(path) => writeln!(self.out, "  {:<8} {} ({})", kind, path.display(), status)?,
                None => writeln!(self.out, "  {:<8} built-in ({})", kind, status)?,
            }
        }
        if let Some(target) = self.store.save_target() {
            writeln!(self.out, "Saves go to the {} layer", target)?;
        }
        Ok(())
    }

    fn execute_layer_action(&mut self, kind: LayerKind, action: LayerAction) -> anyhow::Result<()> {
        match (kind, action) {
            (LayerKind::Local, LayerAction::Create) => self.store.create_local()?,
            (LayerKind::Shared, LayerAction::Create) => self.store.create_shared()?,
            (LayerKind::Local, LayerAction::Remove) => self.store.remove_local()?,
            (LayerKind::Shared, LayerAction::Remove) => self.store.remove_shared()?,
            (LayerKind::Default, _) => bail!("The default layer cannot be changed"),
        }
        info!(layer = %kind, ?action, "Layer action applied");

        let path = self.store.paths().path_for(kind);
        if self.json_output {
            let verb = match action {
                LayerAction::Create => "created",
                LayerAction::Remove => "removed",
            };
            let output = json!({ "layer": kind, "action": verb, "path": path });
            writeln!(self.out, "{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            let path = path.map(|path| path.display().to_string()).unwrap_or_default();
            match action {
                LayerAction::Create => writeln!(self.out, "Using {} layer at {}", kind, path)?,
                LayerAction::Remove => writeln!(self.out, "Removed {} layer at {}", kind, path)?,
            }
        }
        Ok(())
    }
}

fn write_version(out: &mut impl Write, json_output: bool) -> anyhow::Result<()> {
    let version = crate_version();
    if json_output {
        writeln!(out, "{}", serde_json::to_string_pretty(&json!({ "version": version }))?)?;
    } else {
        writeln!(out, "settingstack {}", version)?;
    }
    Ok(())
}

/// Resolve document locations from the environment and the CLI overrides
pub fn resolve_paths(cli: &SettingsCli) -> anyhow::Result<SettingsPaths> {
    let mut paths = SettingsPaths::from_env().context("Failed to locate settings directories")?;
    if let Some(dir) = &cli.local_dir {
        paths = paths.with_local_dir(dir);
    }
    if let Some(dir) = &cli.shared_dir {
        paths = paths.with_shared_dir(dir);
    }
    Ok(paths)
}

/// Run a parsed command, writing results to `out`
pub fn run_cli(cli: SettingsCli, mut out: impl Write) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        return write_version(&mut out, cli.json);
    }

    let paths = resolve_paths(&cli)?;
    debug!(local = %paths.local.display(), shared = %paths.shared.display(), "Resolved settings paths");

    let defaults = builtin_defaults()?;
    let store = LayerBootstrapper::new(paths)
        .bootstrap(defaults)
        .context("Failed to open settings")?;

    let mut executor = CliExecutor::new(store, out, cli.json);
    executor.execute(cli.command)
}
