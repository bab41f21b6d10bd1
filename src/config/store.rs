//! Write-through key-value store for tool settings.
//!
//! Persists individual style settings (sizes, colors) between sessions as a
//! flat TOML map at `~/.config/rastermark/settings.toml`. Availability is
//! probed once when the store is opened; if the file cannot be read and
//! written back, the store silently degrades to an in-memory map for the
//! rest of the session and never touches the disk again.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Key-value settings store with one-time availability probing.
#[derive(Debug)]
pub struct SettingsStore {
    values: BTreeMap<String, String>,
    /// Backing file; `None` means in-memory only for this session.
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Opens the store at the default location under the user config dir.
    ///
    /// Falls back to an in-memory store when no config directory can be
    /// determined or the probe fails.
    pub fn open_default() -> Self {
        match dirs::config_dir() {
            Some(dir) => Self::open(dir.join("rastermark").join("settings.toml")),
            None => {
                warn!("Could not find config directory, settings will not persist");
                Self::in_memory()
            }
        }
    }

    /// Opens the store backed by the given file.
    ///
    /// Existing values are loaded, then a write-back probes that the
    /// location is actually writable. Any failure downgrades the store to
    /// in-memory with a warning; the session continues on defaults.
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => values,
                Err(err) => {
                    warn!("Ignoring malformed settings file {}: {}", path.display(), err);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        let mut store = Self {
            values,
            path: Some(path),
        };

        if !store.try_persist() {
            let path = store.path.take();
            warn!(
                "Settings at {} are not writable, falling back to in-memory settings",
                path.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
            );
        }

        store
    }

    /// Creates a store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            values: BTreeMap::new(),
            path: None,
        }
    }

    /// Whether values written to this store survive the session.
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Returns the stored value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`, writing through to disk when available.
    pub fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        if self.path.is_some() && !self.try_persist() {
            // One failed write ends persistence for the session
            self.path = None;
            warn!("Writing settings failed, keeping them in memory for this session");
        }
    }

    /// Removes every stored value, writing through to disk when available.
    pub fn clear(&mut self) {
        self.values.clear();
        if self.path.is_some() {
            self.try_persist();
        }
    }

    /// Serializes the current values to the backing file.
    ///
    /// Returns `false` when the store is in-memory or the write failed.
    fn try_persist(&self) -> bool {
        let Some(path) = &self.path else {
            return false;
        };

        if let Some(parent) = path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            debug!("Could not create settings directory: {}", err);
            return false;
        }

        let serialized = match toml::to_string_pretty(&self.values) {
            Ok(serialized) => serialized,
            Err(err) => {
                debug!("Could not serialize settings: {}", err);
                return false;
            }
        };

        match fs::write(path, serialized) {
            Ok(()) => true,
            Err(err) => {
                debug!("Could not write settings to {}: {}", path.display(), err);
                false
            }
        }
    }
}
