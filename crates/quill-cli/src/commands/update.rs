//! Configuration update command (quill config update)

use anyhow::Result;
use quill_config::{LoadMode, SettingsStore, SettingsValues};

/// Run the update command.
///
/// Loads permissively so an invalid configuration can still be repaired,
/// merges the provided values, validates strictly, and persists.
pub fn run(store: &SettingsStore, values: SettingsValues) -> Result<()> {
    let current = store.load(LoadMode::Permissive)?;
    let updated = current.update(values)?;
    store.save(&updated)?;
    println!("{}", updated.render());
    Ok(())
}
