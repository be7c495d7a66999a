use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::FixCommand,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, print_notices},
};
use super::helper::{
    display_path, document_path, flush_notifications, load_settings, read_document, runtime,
};
use crate::core::{LineIndex, Workspace, fix_deprecated};

#[derive(Debug, Default)]
struct FixSummary {
    fixable: usize,
    unfixable: usize,
    files: usize,
}

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let settings = load_settings(&cmd.common)?;
    let mut workspace = Workspace::new(settings);
    let runtime = runtime()?;
    let mut summary = FixSummary::default();
    let mut unreadable = Vec::new();

    for file in &cmd.files {
        let read = document_path(file).and_then(|path| Ok((read_document(&path)?, path)));
        let (text, path) = match read {
            Ok(read) => read,
            Err(err) => {
                unreadable.push(format!("{:#}", err));
                continue;
            }
        };
        let shown = display_path(&path);
        let id = runtime.block_on(workspace.open(path.clone(), text));

        let Some(document) = workspace.document(id) else {
            continue;
        };
        let index = LineIndex::new(&document.text);
        let mut fixable = 0;
        for diagnostic in workspace.diagnostics(id) {
            let position = index.position(diagnostic.span.start);
            let location = format!("{}:{}:{}", shown, position.line, position.col);
            if !diagnostic.fixable {
                summary.unfixable += 1;
                println!(
                    "{} {} {}",
                    FAILURE_MARK.red(),
                    location,
                    diagnostic.message.dimmed()
                );
                continue;
            }
            fixable += 1;
            if !cmd.apply {
                let old = &document.text[diagnostic.span.clone()];
                let new = fix_deprecated(old).unwrap_or_default();
                println!("  {} {}", "-->".blue(), location);
                println!("  {} {}", "-".red(), old);
                println!("  {} {}", "+".green(), new);
            }
        }

        if fixable > 0 {
            summary.fixable += fixable;
            summary.files += 1;
            if cmd.apply {
                workspace.fix_all_deprecated(id);
                if let Some(document) = workspace.document(id) {
                    fs::write(&path, &document.text)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                }
            }
        }
        workspace.close(id);
    }

    print_notices(&unreadable);
    let had_notices = flush_notifications(&mut workspace) || !unreadable.is_empty();
    print_summary(&summary, cmd.apply);

    Ok(if had_notices {
        ExitStatus::Error
    } else if summary.unfixable > 0 || (summary.fixable > 0 && !cmd.apply) {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn print_summary(summary: &FixSummary, apply: bool) {
    if summary.fixable > 0 {
        if apply {
            println!(
                "{} {} call(s) in {} file(s).",
                "Fixed".green().bold(),
                summary.fixable,
                summary.files
            );
        } else {
            println!(
                "{} {} call(s) in {} file(s).",
                "Would fix".yellow().bold(),
                summary.fixable,
                summary.files
            );
            println!("Run with {} to rewrite these calls.", "--apply".cyan());
        }
    }
    if summary.unfixable > 0 {
        println!(
            "Note: {} deprecated call(s) have no direct replacement and need manual migration.",
            summary.unfixable
        );
    }
}
