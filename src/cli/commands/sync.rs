use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::SyncCommand,
    exit_status::ExitStatus,
    report::{SUCCESS_MARK, print_notices},
};
use super::helper::{
    display_path, document_path, flush_notifications, load_settings, read_document, runtime,
};
use crate::core::{Language, Workspace};

pub fn sync(cmd: SyncCommand) -> Result<ExitStatus> {
    let settings = load_settings(&cmd.common)?;
    let mut workspace = Workspace::new(settings);
    let mut status = ExitStatus::Success;

    let runtime = runtime()?;
    for file in &cmd.files {
        let path = match document_path(file) {
            Ok(path) => path,
            Err(err) => {
                print_notices(&[format!("{:#}", err)]);
                status = ExitStatus::Error;
                continue;
            }
        };
        let shown = display_path(&path);
        if Language::from_path(&path) != Language::Html {
            eprintln!("{} {} is not an HTML view", "warning:".bold().yellow(), shown);
            status = status.max(ExitStatus::Failure);
            continue;
        }

        let text = match read_document(&path) {
            Ok(text) => text,
            Err(err) => {
                print_notices(&[format!("{:#}", err)]);
                status = ExitStatus::Error;
                continue;
            }
        };
        let (id, outcome) = runtime.block_on(async {
            let id = workspace.open(path.clone(), text).await;
            (id, workspace.sync_localize(id).await)
        });
        if flush_notifications(&mut workspace) {
            status = ExitStatus::Error;
        }

        match outcome {
            Some(outcome) if outcome.has_new_keys() => {
                if let Some(text) = &outcome.text {
                    fs::write(&path, text)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                }
                println!(
                    "{} {} key(s) from {}: {}",
                    "Added".green().bold(),
                    outcome.added.len(),
                    shown,
                    outcome.added.join(", ")
                );
            }
            Some(_) => println!("{} {}: no new keys", SUCCESS_MARK.green(), shown),
            None => {}
        }
        workspace.close(id);
    }

    Ok(status)
}
