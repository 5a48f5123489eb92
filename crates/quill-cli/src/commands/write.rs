//! Post scaffolding command (quill write)

use anyhow::{Context, Result};
use chrono::Local;
use quill_config::{LoadMode, SettingsStore};
use std::fs;
use std::path::PathBuf;

use crate::editor;
use crate::post;

/// Arguments for the write command
#[derive(Debug, Clone)]
pub struct WriteArgs {
    /// The title of the new post
    pub title: String,
    /// Categories to add to the post
    pub categories: Vec<String>,
    /// Tags to add to the post
    pub tags: Vec<String>,
    /// Directory the post file is created in
    pub posts_dir: PathBuf,
    /// Skip opening the editor after creating the post
    pub no_edit: bool,
}

/// Run the write command: scaffold a post and open it in the editor.
///
/// Requires bound settings (strict load) so the error carries the bind
/// guidance when the tool has never been configured.
pub fn run(store: &SettingsStore, args: WriteArgs) -> Result<()> {
    let settings = store.load(LoadMode::Strict)?;

    let date = Local::now().format("%Y-%m-%d").to_string();
    let text = post::build_post(
        &date,
        &args.title,
        &args.categories,
        &args.tags,
        settings.markdown_textwrap.map(|w| w as usize),
    )?;

    let path = post::post_path(&args.posts_dir, &date, &args.title);
    fs::create_dir_all(&args.posts_dir).with_context(|| {
        format!(
            "Failed to create the posts directory {}",
            args.posts_dir.display()
        )
    })?;
    tracing::debug!(path = %path.display(), "Saving post");
    fs::write(&path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());

    if !args.no_edit {
        let editor_command = settings.editor().context(
            "No editor command configured and $EDITOR is unset; run 'config update --editor-command'",
        )?;
        editor::open(&editor_command, &path)?;
    }
    Ok(())
}
