use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tokio::runtime::Runtime;

use super::super::{args::CommonArgs, report::print_notices};
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    core::{Workspace, WorkspaceSettings},
};

/// Loads the config found from the working directory and applies the
/// repository overrides, which resolve against the working directory.
///
/// Without a config file both repositories must come from flags or env.
pub fn load_settings(common: &CommonArgs) -> Result<WorkspaceSettings> {
    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let mut loaded = load_config(&cwd)?;

    if !loaded.from_file && common.ngconsole.is_none() && common.ngconsole_resources.is_none() {
        bail!(
            "No {} found. Run `vdife init` or pass --ngconsole and --ngconsole-resources.",
            CONFIG_FILE_NAME
        );
    }

    if let Some(path) = &common.ngconsole {
        loaded.config.ngconsole = Some(cwd.join(path).to_string_lossy().into_owned());
    }
    if let Some(path) = &common.ngconsole_resources {
        loaded.config.ngconsole_resources = Some(cwd.join(path).to_string_lossy().into_owned());
    }

    loaded.config.settings(&loaded.base_dir)
}

/// Single-threaded runtime for the async engine.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")
}

/// Canonical path of a document argument.
pub fn document_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("File not found: {}", path.display()))
}

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Path relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    let relative = env::current_dir()
        .ok()
        .and_then(|cwd| fs::canonicalize(cwd).ok())
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    relative
        .as_deref()
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Prints pending notifications; returns true if there were any.
pub fn flush_notifications(workspace: &mut Workspace) -> bool {
    let messages: Vec<String> = workspace
        .take_notifications()
        .into_iter()
        .map(|notification| notification.message)
        .collect();
    print_notices(&messages);
    !messages.is_empty()
}
