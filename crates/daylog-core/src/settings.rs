//! Key-value settings store used to seed logger defaults.
//!
//! The store is a flat JSON object on disk. Reading a key through
//! [`SettingsStore::get_or_insert`] creates the entry with its default when
//! it is missing; [`LoggerDefaults::from_store`] then writes the file back so
//! the defaults are visible (and editable) on the next run.
//!
//! ```text
//! {
//!   "level": "INFO",
//!   "supportsColor": true,
//!   "useFile": true,
//!   "fileDirectory": "logs",
//!   "namingScheme": "logger",
//!   "customName": "latest",
//!   "format": "default"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{LogError, LogResult};
use crate::format::{scheme, SchemeRegistry};
use crate::logger::{LoggerDefaults, NamingScheme};
use crate::severity::Severity;

/// Setting names.
pub mod keys {
    pub const LEVEL: &str = "level";
    pub const SUPPORTS_COLOR: &str = "supportsColor";
    pub const USE_FILE: &str = "useFile";
    pub const FILE_DIRECTORY: &str = "fileDirectory";
    pub const NAMING_SCHEME: &str = "namingScheme";
    pub const CUSTOM_NAME: &str = "customName";
    pub const FORMAT: &str = "format";
}

/// Naming scheme value selecting the logger name as file stem.
pub const NAMING_LOGGER: &str = "logger";
/// Naming scheme value selecting `customName` as file stem.
pub const NAMING_CUSTOM: &str = "custom";
const DEFAULT_CUSTOM_NAME: &str = "latest";

/// Flat JSON key-value store, optionally backed by a file.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    values: Map<String, Value>,
    dirty: bool,
}

impl SettingsStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store at `path`. A missing file yields an empty store bound to it.
    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        let values = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Map::new(),
            Ok(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => map,
                other => {
                    return Err(LogError::Settings(format!(
                        "{} must hold a JSON object, found {}",
                        path.display(),
                        type_name(&other)
                    )))
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether entries were added or changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Typed read. `Ok(None)` when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> LogResult<Option<T>> {
        match self.values.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| LogError::Settings(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> LogResult<()> {
        let value = serde_json::to_value(value)?;
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
        Ok(())
    }

    /// Typed read that stores `default` when the key is missing.
    pub fn get_or_insert<T: Serialize + DeserializeOwned>(&mut self, key: &str, default: T) -> LogResult<T> {
        if let Some(value) = self.get(key)? {
            return Ok(value);
        }
        self.set(key, &default)?;
        Ok(default)
    }

    /// Write the store to its file, if it has one.
    pub fn save(&mut self) -> LogResult<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, self.to_pretty_json()?)?;
        }
        self.dirty = false;
        Ok(())
    }

    pub fn to_pretty_json(&self) -> LogResult<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl LoggerDefaults {
    /// Read logger defaults from `store`, inserting and persisting any that are missing.
    ///
    /// Unknown level or format names are errors rather than silent fallbacks.
    pub fn from_store(store: &mut SettingsStore, schemes: &SchemeRegistry) -> LogResult<Self> {
        let level: String = store.get_or_insert(keys::LEVEL, Severity::Info.name().to_string())?;
        let ansi = store.get_or_insert(keys::SUPPORTS_COLOR, true)?;
        let use_file = store.get_or_insert(keys::USE_FILE, true)?;
        let directory: String = store.get_or_insert(keys::FILE_DIRECTORY, "logs".to_string())?;
        let naming: String = store.get_or_insert(keys::NAMING_SCHEME, NAMING_LOGGER.to_string())?;
        let custom_name: String = store.get_or_insert(keys::CUSTOM_NAME, DEFAULT_CUSTOM_NAME.to_string())?;
        let format: String = store.get_or_insert(keys::FORMAT, scheme::DEFAULT.to_string())?;

        if store.is_dirty() {
            store.save()?;
            tracing::debug!(path = ?store.path(), "settings defaults persisted");
        }

        let threshold: Severity = level.parse()?;
        let naming = match naming.trim().to_ascii_lowercase().as_str() {
            NAMING_LOGGER => NamingScheme::Logger,
            NAMING_CUSTOM => NamingScheme::Custom(custom_name),
            other => {
                return Err(LogError::Settings(format!(
                    "{}: expected \"{}\" or \"{}\", found \"{}\"",
                    keys::NAMING_SCHEME,
                    NAMING_LOGGER,
                    NAMING_CUSTOM,
                    other
                )))
            }
        };
        let template = schemes
            .build(&format)
            .ok_or_else(|| LogError::UnknownScheme(format.clone()))?;

        Ok(Self {
            threshold,
            ansi,
            use_file,
            directory: PathBuf::from(directory),
            naming,
            template,
        })
    }
}
