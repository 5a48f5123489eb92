//! External editor invocation

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Open `path` with the given editor command and wait for it to exit.
///
/// The command is split on whitespace so multi-word commands like `code -w`
/// work without a shell.
pub fn open(editor_command: &str, path: &Path) -> Result<()> {
    tracing::debug!(editor = editor_command, path = %path.display(), "Opening editor");

    let mut parts = editor_command.split_whitespace();
    let program = parts
        .next()
        .context("Editor command is empty; set one with 'config update --editor-command'")?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor_command))?;

    if !status.success() {
        bail!("Editor '{}' exited with {}", editor_command, status);
    }
    Ok(())
}
