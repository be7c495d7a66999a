use anyhow::Result;
use colored::Colorize;

use super::super::{args::AddCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use super::helper::{document_path, flush_notifications, load_settings, read_document, runtime};
use crate::core::{Workspace, parse_entry};

pub fn add(cmd: AddCommand) -> Result<ExitStatus> {
    let Some((key, _)) = parse_entry(&cmd.entry) else {
        eprintln!("Error: expected an entry of the form key=value");
        return Ok(ExitStatus::Failure);
    };
    let key = key.to_string();

    let settings = load_settings(&cmd.common)?;
    let path = document_path(&cmd.file)?;
    let text = read_document(&path)?;
    let mut workspace = Workspace::new(settings);

    let added = runtime()?.block_on(async {
        let id = workspace.open(path, text).await;
        let added = workspace.new_localize(id, &cmd.entry).await;
        let resource = workspace.resource_file(id).map(ToString::to_string);
        added.then_some(resource).flatten()
    });

    if flush_notifications(&mut workspace) {
        return Ok(ExitStatus::Error);
    }
    let Some(resource) = added else {
        eprintln!("Error: {} has no language pack", cmd.file.display());
        return Ok(ExitStatus::Failure);
    };

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Added {} to {}", key, resource).green()
    );
    Ok(ExitStatus::Success)
}
