//! Persisted settings and the config-store collaborator contract.
//!
//! The store owns the `{ transcription: {...}, processing: {...} }` blob,
//! persists it as JSON, and notifies subscribers whenever the blob changes
//! so the pipeline coordinator can rebuild its clients. Loading and
//! importing deep-merge over defaults, so partial or stale files never
//! lose newly introduced fields.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ProcessingProfile, TranscriptionProfile};

const CONFIG_FILE: &str = "config.json";

/// The persisted configuration blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub transcription: TranscriptionProfile,
    pub processing: ProcessingProfile,
}

type Listener = Box<dyn Fn(&Settings) + Send>;

/// Owner of the settings blob. Collaborator interface per the pipeline's
/// contract: `load`, `save`, `get`, `set`, `reset`, `export_config`,
/// `import_config`, and `subscribe`.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
    listeners: Vec<Listener>,
}

impl SettingsStore {
    /// Create a store backed by the given file. Nothing is read until
    /// [`SettingsStore::load`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
            listeners: Vec::new(),
        }
    }

    /// Create a store at the platform config location
    /// (`<config_dir>/sotto/config.json`).
    pub fn at_default_location() -> Result<Self> {
        let dir = dirs::config_dir().context("No config directory available")?;
        Ok(Self::new(dir.join("sotto").join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load from disk, deep-merging the file's contents over defaults.
    /// A missing or unreadable file falls back to defaults rather than
    /// failing; subscribers are notified either way.
    pub fn load(&mut self) -> &Settings {
        self.settings = match fs::read_to_string(&self.path) {
            Ok(raw) => match merge_over_defaults(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings, using defaults: {e}");
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };
        self.notify();
        &self.settings
    }

    /// Persist the current blob and notify subscribers.
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.settings)
            .context("Failed to serialize settings")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.notify();
        Ok(())
    }

    /// Restore defaults and persist them.
    pub fn reset(&mut self) -> Result<()> {
        self.settings = Settings::default();
        self.save()
    }

    /// Read a value by dot path, e.g. `"processing.model"`.
    pub fn get(&self, path: &str) -> Option<Value> {
        let mut value = serde_json::to_value(&self.settings).ok()?;
        for key in path.split('.') {
            value = value.get_mut(key)?.take();
        }
        Some(value)
    }

    /// Write a value by dot path. The result must still deserialize into
    /// a valid [`Settings`]; the change is not persisted until `save`.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let mut tree = serde_json::to_value(&self.settings).context("Settings serialization")?;
        set_at_path(&mut tree, path, value)?;
        self.settings = serde_json::from_value(tree)
            .with_context(|| format!("Value at '{path}' does not fit the settings shape"))?;
        Ok(())
    }

    /// Export the blob as pretty-printed JSON.
    pub fn export_config(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.settings).context("Failed to serialize settings")
    }

    /// Import a JSON blob: deep-merge over defaults, persist, notify.
    pub fn import_config(&mut self, json: &str) -> Result<()> {
        self.settings = merge_over_defaults(json).context("Failed to import config")?;
        self.save()
    }

    /// Register a change listener. Fired after load, save, reset and
    /// import, with the new blob.
    pub fn subscribe(&mut self, listener: impl Fn(&Settings) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.settings);
        }
    }
}

/// Deep-merge a raw JSON document over the default blob. Objects merge
/// key-by-key, everything else overwrites. Unknown keys are dropped by
/// the final typed deserialization.
fn merge_over_defaults(raw: &str) -> Result<Settings> {
    let overrides: Value = serde_json::from_str(raw).context("Invalid JSON")?;
    let mut merged =
        serde_json::to_value(Settings::default()).context("Settings serialization")?;
    deep_merge(&mut merged, &overrides);
    serde_json::from_value(merged).context("Merged config does not fit the settings shape")
}

fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

fn set_at_path(tree: &mut Value, path: &str, value: Value) -> Result<()> {
    let mut keys = path.split('.').peekable();
    let mut cursor = tree;
    while let Some(key) = keys.next() {
        if keys.peek().is_none() {
            match cursor {
                Value::Object(map) => {
                    map.insert(key.to_string(), value);
                    return Ok(());
                }
                _ => anyhow::bail!("'{path}' does not address an object field"),
            }
        }
        cursor = match cursor {
            Value::Object(map) => map
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Default::default())),
            _ => anyhow::bail!("'{path}' does not address an object field"),
        };
    }
    Ok(())
}
