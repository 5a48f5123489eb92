//! Quill Settings Management
//!
//! Provides the persisted configuration for the quill blog tool:
//! - Settings model and lifecycle (init / update / unset / display)
//! - JSON storage in the user cache directory
//! - Strict and permissive loading (permissive loads keep a validation
//!   warning on the instance so invalid settings can be inspected and
//!   repaired)
//!
//! # Example
//!
//! ```no_run
//! use quill_config::{LoadMode, SettingsStore};
//!
//! let store = SettingsStore::new(SettingsStore::default_path().unwrap());
//! let settings = store.load(LoadMode::Permissive).unwrap();
//! println!("{}", settings.render());
//! ```

pub mod settings;
pub mod store;

use std::path::PathBuf;
use thiserror::Error;

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No settings file found at {0}. Run the 'config bind' sub-command first to establish your settings")]
    FileMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Failed to access the settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in {file}: {error}")]
    JsonParse {
        file: PathBuf,
        error: serde_json::Error,
    },

    #[error("User cache directory not found")]
    CacheDirNotFound,
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

// Re-export main types
pub use settings::{FieldError, Settings, SettingsValues, ValidationErrors, EDITOR_ENV};
pub use store::{LoadMode, SettingsStore};
