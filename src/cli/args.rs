//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report missing translations and deprecated API calls
//! - `sync`: Add every missing key of HTML views to the language pack
//! - `add`: Add a `key=value` entry to the language pack of a view
//! - `fix`: Rewrite deprecated API calls that have a replacement
//! - `hover`: Show the translation of the key at a position
//! - `init`: Initialize vdife configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Repository locations, overriding the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Path of the ngconsole repository
    #[arg(long, env = "VDIFE_NGCONSOLE")]
    pub ngconsole: Option<PathBuf>,

    /// Path of the ngconsole_resources repository
    #[arg(long, env = "VDIFE_NGCONSOLE_RESOURCES")]
    pub ngconsole_resources: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Files or directories to check (default: the ngconsole repository)
    pub paths: Vec<PathBuf>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// HTML views to synchronize
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct AddCommand {
    /// HTML view whose language pack receives the entry
    pub file: PathBuf,
    /// Entry in `key=value` form
    pub entry: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    /// Scripts to fix
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Actually rewrite the files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct HoverCommand {
    pub file: PathBuf,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub col: usize,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check views for missing translations and scripts for deprecated API calls
    Check(CheckCommand),
    /// Add missing keys of HTML views to ngconsole_resources and drop `data-` prefixes
    Sync(SyncCommand),
    /// Add a `key=value` translation to the language pack of a view
    Add(AddCommand),
    /// Rewrite deprecated API calls that have a direct replacement
    Fix(FixCommand),
    /// Show the translation of the localization key at a position
    Hover(HoverCommand),
    /// Initialize a new .vdiferc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve(ServeCommand),
}
