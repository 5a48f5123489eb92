//! Persisted settings storage (JSON file in the user cache directory)
//!
//! The file path is injected at construction time so callers (and tests)
//! decide where settings live; there are no process-wide path singletons.

use crate::settings::{Settings, SettingsValues};
use crate::{SettingsError, SettingsResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How a missing or invalid settings file is handled during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Missing file or failed validation is an error
    Strict,
    /// Missing file yields empty settings; validation failures are deferred
    /// into `invalid_warning` so the settings can be inspected and repaired
    Permissive,
}

/// Storage for the persisted settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default settings file location: `<cache dir>/quill/settings.json`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let cache = dirs::cache_dir().ok_or(SettingsError::CacheDirNotFound)?;
        Ok(cache.join("quill").join("settings.json"))
    }

    /// The file path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and construct settings from the persisted file.
    ///
    /// A file that exists but is not a JSON object is an error in both
    /// modes. Wrong-typed fields are deferred into `invalid_warning` under
    /// permissive loading, the same as any other validation failure, so an
    /// invalid file stays inspectable and repairable.
    pub fn load(&self, mode: LoadMode) -> SettingsResult<Settings> {
        tracing::debug!(path = %self.path.display(), "Loading settings");
        let strict = mode == LoadMode::Strict;
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let object: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(&content).map_err(|error| SettingsError::JsonParse {
                        file: self.path.clone(),
                        error,
                    })?;
                let (values, field_errors) = SettingsValues::from_json(&object);
                Settings::init_checked(values, field_errors, strict)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if strict {
                    return Err(SettingsError::FileMissing(self.path.clone()));
                }
                Settings::init(SettingsValues::default(), false)
            }
            Err(e) => Err(SettingsError::Io(e)),
        }
    }

    /// Serialize the settings (excluding `invalid_warning`) to the file,
    /// overwriting any prior contents. Creates the parent directory if
    /// needed.
    pub fn save(&self, settings: &Settings) -> SettingsResult<()> {
        tracing::debug!(path = %self.path.display(), "Saving settings");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|error| {
            SettingsError::JsonParse {
                file: self.path.clone(),
                error,
            }
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Delete the persisted file. A missing file is a no-op.
    pub fn clear(&self) -> SettingsResult<()> {
        tracing::debug!(path = %self.path.display(), "Removing saved settings");
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SettingsError::Io(e)),
        }
    }
}
