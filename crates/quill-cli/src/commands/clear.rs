//! Configuration clear command (quill config clear)

use anyhow::Result;
use quill_config::SettingsStore;

/// Run the clear command. Deleting an already-missing file succeeds.
pub fn run(store: &SettingsStore) -> Result<()> {
    store.clear()?;
    println!("Cleared settings at {}", store.path().display());
    Ok(())
}
