//! Configuration unset command (quill config unset)

use anyhow::Result;
use quill_config::{LoadMode, SettingsStore};

/// Arguments for the unset command
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsetArgs {
    pub markdown_textwrap: bool,
    pub editor_command: bool,
}

/// Run the unset command: drop the flagged fields, validate strictly,
/// persist.
pub fn run(store: &SettingsStore, args: UnsetArgs) -> Result<()> {
    let mut keys: Vec<&str> = Vec::new();
    if args.markdown_textwrap {
        keys.push("markdown_textwrap");
    }
    if args.editor_command {
        keys.push("editor_command");
    }

    let current = store.load(LoadMode::Permissive)?;
    let trimmed = current.unset(&keys)?;
    store.save(&trimmed)?;
    println!("{}", trimmed.render());
    Ok(())
}
