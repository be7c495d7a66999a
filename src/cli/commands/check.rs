use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use super::super::{
    args::CheckCommand,
    exit_status::ExitStatus,
    report::{ReportItem, print_notices, print_success, report},
};
use super::helper::{
    display_path, document_path, flush_notifications, load_settings, read_document, runtime,
};
use crate::core::{Language, LineIndex, Workspace, WorkspaceSettings};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let settings = load_settings(&cmd.common)?;
    let files = collect_files(&cmd.paths, &settings)?;
    tracing::debug!(files = files.len(), "collected documents");

    let mut workspace = Workspace::new(settings);
    let mut items = Vec::new();
    let mut unreadable = Vec::new();

    runtime()?.block_on(async {
        for path in &files {
            let text = match read_document(path) {
                Ok(text) => text,
                Err(err) => {
                    unreadable.push(format!("{:#}", err));
                    continue;
                }
            };
            let id = workspace.open(path.clone(), text).await;
            let Some(document) = workspace.document(id) else {
                continue;
            };
            let index = LineIndex::new(&document.text);
            let shown = display_path(path);
            items.extend(
                workspace
                    .diagnostics(id)
                    .iter()
                    .map(|diagnostic| ReportItem::new(&shown, &index, diagnostic)),
            );
        }
    });

    print_notices(&unreadable);
    let had_notices = flush_notifications(&mut workspace) || !unreadable.is_empty();
    workspace.shutdown();

    report(&items);
    if items.is_empty() && !had_notices {
        print_success(files.len());
    }

    Ok(if had_notices {
        ExitStatus::Error
    } else if items.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}

/// HTML and JavaScript files under `paths`, or under the ngconsole root when
/// no path is given. Hidden and ignored entries are skipped.
fn collect_files(paths: &[PathBuf], settings: &WorkspaceSettings) -> Result<Vec<PathBuf>> {
    let roots = if paths.is_empty() {
        vec![settings.roots.app.clone()]
    } else {
        paths
            .iter()
            .map(|path| document_path(path))
            .collect::<Result<_>>()?
    };

    let mut files: Vec<PathBuf> = roots
        .iter()
        .flat_map(|root| {
            WalkDir::new(root)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry.path(), settings))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| Language::from_path(path) != Language::Other)
        })
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_skipped(path: &Path, settings: &WorkspaceSettings) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'));
    hidden || settings.is_ignored(path)
}
