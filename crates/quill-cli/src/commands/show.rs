//! Configuration display command (quill config show)

use anyhow::Result;
use quill_config::{LoadMode, SettingsStore};

/// Run the show command. Loads permissively so an invalid configuration is
/// still displayed, with its warning line.
pub fn run(store: &SettingsStore) -> Result<()> {
    let settings = store.load(LoadMode::Permissive)?;
    println!("{}", settings.render());
    Ok(())
}
