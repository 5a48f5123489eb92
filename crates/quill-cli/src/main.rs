use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use quill_config::{SettingsStore, SettingsValues};
use std::io;
use std::path::PathBuf;

mod commands;
mod editor;
mod logging;
mod post;

/// Personal blog authoring tool.
///
/// quill keeps a small persisted configuration (editor command, markdown
/// wrap width) and scaffolds new blog posts with YAML front-matter before
/// opening them in your editor.
///
/// EXAMPLES:
///     quill config bind --editor-command vim
///     quill write "My first post" --tag rust
///     quill config show
///
/// ENVIRONMENT VARIABLES:
///     EDITOR               Fallback editor command
///     QUILL_SETTINGS_FILE  Override the settings file location
///     RUST_LOG             Override the log filter
#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Path to the settings file (defaults to the user cache directory)
    #[arg(long, global = true, env = "QUILL_SETTINGS_FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the app, change settings, or view how it's currently configured
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate a new post for the blog and open it in an editor
    ///
    /// Requires bound settings; run 'quill config bind' first.
    ///
    /// EXAMPLES:
    ///     quill write "My first post"
    ///     quill write "Release notes" --tag rust --category news
    #[command(visible_alias = "w")]
    Write {
        /// The title of the new post
        title: String,
        /// Categories to add to the post (can be repeated)
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Tags to add to the post (can be repeated)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Directory the post file is created in
        #[arg(long, default_value = "docs/source/posts")]
        posts_dir: PathBuf,
        /// Create the post without opening the editor
        #[arg(long)]
        no_edit: bool,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     quill completions bash > ~/.bash_completions/quill.bash
    ///     quill completions zsh > ~/.zfunc/_quill
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Bind the configuration to the app
    Bind {
        /// Wrap generated markdown to the given number of characters
        #[arg(long)]
        markdown_textwrap: Option<i64>,
        /// System command used for opening files in an editor
        /// (falls back to $EDITOR when not provided)
        #[arg(long)]
        editor_command: Option<String>,
    },

    /// Update one or more configuration settings that are bound to the app
    Update {
        /// Wrap generated markdown to the given number of characters
        #[arg(long)]
        markdown_textwrap: Option<i64>,
        /// System command used for opening files in an editor
        #[arg(long)]
        editor_command: Option<String>,
    },

    /// Remove a configuration setting that was previously bound to the app
    Unset {
        /// Remove the configured wrap width
        #[arg(long)]
        markdown_textwrap: bool,
        /// Remove the configured editor command
        #[arg(long)]
        editor_command: bool,
    },

    /// Show the config that is currently bound to the app
    Show,

    /// Clear the config from the app
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = match cli.config_file {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::new(SettingsStore::default_path()?),
    };

    match cli.command {
        Commands::Config(config_command) => match config_command {
            ConfigCommands::Bind {
                markdown_textwrap,
                editor_command,
            } => commands::bind::run(
                &store,
                SettingsValues {
                    markdown_textwrap,
                    editor_command,
                },
            )?,
            ConfigCommands::Update {
                markdown_textwrap,
                editor_command,
            } => commands::update::run(
                &store,
                SettingsValues {
                    markdown_textwrap,
                    editor_command,
                },
            )?,
            ConfigCommands::Unset {
                markdown_textwrap,
                editor_command,
            } => commands::unset::run(
                &store,
                commands::unset::UnsetArgs {
                    markdown_textwrap,
                    editor_command,
                },
            )?,
            ConfigCommands::Show => commands::show::run(&store)?,
            ConfigCommands::Clear => commands::clear::run(&store)?,
        },
        Commands::Write {
            title,
            categories,
            tags,
            posts_dir,
            no_edit,
        } => {
            let args = commands::write::WriteArgs {
                title,
                categories,
                tags,
                posts_dir,
                no_edit,
            };
            commands::write::run(&store, args)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
