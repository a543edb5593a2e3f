use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::{model::TriggerDefinition, registry::TriggerRegistry};

/// File-backed store for the custom trigger overlay.
///
/// The overlay is persisted as a plain JSON array of definitions, so exported trigger sets move between
/// installations without a conversion step. Reads don't lock: they parse a
/// consistent snapshot of the file. Writes are serialized through a single mutex, the single-writer discipline
/// that keeps concurrent UI interactions from losing updates.
pub struct TriggerStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TriggerStore {
    /// Creates a store persisting the overlay at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TriggerStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The default overlay location, under the user data directory
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "trigger-engine")
            .ok_or_else(|| eyre!("Couldn't determine the user data directory"))?;
        Ok(dirs.data_dir().join("triggers.json"))
    }

    /// Path the overlay is persisted at
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the registry, reading the persisted overlay if any.
    ///
    /// A missing file is a fresh install: the registry starts with an empty overlay.
    #[instrument(skip_all)]
    pub fn load(&self) -> Result<TriggerRegistry> {
        if !self.path.exists() {
            debug!("No overlay file at {}, starting empty", self.path.display());
            return Ok(TriggerRegistry::new());
        }
        let overlay = read_definitions(&self.path)?;
        debug!("Loaded {} overlay trigger(s)", overlay.len());
        Ok(TriggerRegistry::with_overlay(overlay))
    }

    /// Persists the registry overlay
    #[instrument(skip_all)]
    pub fn save(&self, registry: &TriggerRegistry) -> Result<()> {
        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Couldn't create the data directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(registry.overlay()).wrap_err("Couldn't serialize the overlay")?;
        fs::write(&self.path, json)
            .wrap_err_with(|| format!("Couldn't write the overlay file: {}", self.path.display()))?;
        debug!("Saved {} overlay trigger(s)", registry.overlay().len());
        Ok(())
    }

    /// Exports the full merged trigger set to the given path as a JSON array
    #[instrument(skip(self, registry))]
    pub fn export_to(&self, registry: &TriggerRegistry, path: impl AsRef<Path> + std::fmt::Debug) -> Result<()> {
        let json = serde_json::to_string_pretty(&registry.load()).wrap_err("Couldn't serialize the triggers")?;
        fs::write(path.as_ref(), json)
            .wrap_err_with(|| format!("Couldn't write the export file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Imports a trigger set from the given path, replacing the current overlay.
    ///
    /// Every imported entry goes through the registry's own validation, so a set carrying colliding tags is
    /// rejected instead of silently corrupting the merged view. Entries identical to a shipped built-in are
    /// skipped rather than duplicated into the overlay.
    #[instrument(skip(self))]
    pub fn import_from(&self, path: impl AsRef<Path> + std::fmt::Debug) -> Result<TriggerRegistry> {
        let imported = read_definitions(path.as_ref())?;
        let mut registry = TriggerRegistry::new();
        for definition in imported {
            let matches_builtin = TriggerRegistry::builtins()
                .iter()
                .any(|b| b.matches_keyword(&definition.keyword) && b.enabled == definition.enabled);
            if matches_builtin && !definition.is_custom() {
                continue;
            }
            if definition.is_custom() {
                registry.upsert(definition).map_err(|err| err.into_report())?;
            } else if registry.set_enabled(&definition.keyword, definition.enabled).is_err() {
                tracing::warn!("Skipping unknown built-in trigger '{}'", definition.keyword);
            }
        }
        self.save(&registry)?;
        Ok(registry)
    }
}

fn read_definitions(path: &Path) -> Result<Vec<TriggerDefinition>> {
    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("Couldn't read the trigger file: {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Invalid trigger file: {}", path.display()))
}
