//! First-time configuration binding (quill config bind)

use anyhow::Result;
use quill_config::{Settings, SettingsStore, SettingsValues};

/// Run the bind command: strict construction, persist, display
pub fn run(store: &SettingsStore, values: SettingsValues) -> Result<()> {
    let settings = Settings::init(values, true)?;
    store.save(&settings)?;
    println!("{}", settings.render());
    Ok(())
}
