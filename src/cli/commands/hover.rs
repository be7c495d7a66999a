use anyhow::Result;

use super::super::{args::HoverCommand, exit_status::ExitStatus};
use super::helper::{document_path, flush_notifications, load_settings, read_document, runtime};
use crate::core::{LineIndex, Position, Workspace};

pub fn hover(cmd: HoverCommand) -> Result<ExitStatus> {
    let settings = load_settings(&cmd.common)?;
    let path = document_path(&cmd.file)?;
    let text = read_document(&path)?;
    let Some(offset) = LineIndex::new(&text).offset(Position {
        line: cmd.line,
        col: cmd.col,
    }) else {
        eprintln!("Error: line {} is out of range", cmd.line);
        return Ok(ExitStatus::Failure);
    };

    let mut workspace = Workspace::new(settings);
    let id = runtime()?.block_on(workspace.open(path, text));
    if flush_notifications(&mut workspace) {
        return Ok(ExitStatus::Error);
    }

    match workspace.hover(id, offset) {
        Some(hover) => {
            println!("{}", hover.key);
            println!("{}", hover.contents());
            Ok(ExitStatus::Success)
        }
        None => {
            eprintln!("No localization key at {}:{}", cmd.line, cmd.col);
            Ok(ExitStatus::Failure)
        }
    }
}
