//! Report formatting and printing utilities.
//!
//! Diagnostics are displayed in cargo-style format. Kept apart from the
//! engine so vdife can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{Diagnostic, DiagnosticSource, LineIndex};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// A diagnostic resolved to a printable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    pub path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
    pub message: String,
    pub rule: DiagnosticSource,
    pub help: Option<String>,
}

impl ReportItem {
    pub fn new(path: &str, index: &LineIndex<'_>, diagnostic: &Diagnostic) -> Self {
        let position = index.position(diagnostic.span.start);
        Self {
            path: path.to_string(),
            line: position.line,
            col: position.col,
            source_line: index.line_text(position.line).to_string(),
            message: diagnostic.message.clone(),
            rule: diagnostic.source,
            help: diagnostic.quick_fix().map(|fix| fix.title()),
        }
    }
}

/// Print diagnostics in cargo-style format to stdout.
pub fn report(items: &[ReportItem]) {
    report_to(items, &mut io::stdout().lock());
}

/// Print diagnostics to a custom writer.
pub fn report_to<W: Write>(items: &[ReportItem], writer: &mut W) {
    if items.is_empty() {
        return;
    }

    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| a.col.cmp(&b.col))
    });

    let max_line_width = sorted
        .iter()
        .map(|item| item.line.to_string().len())
        .max()
        .unwrap_or(1);

    for item in &sorted {
        print_item(item, writer, max_line_width);
    }

    let total = sorted.len();
    let _ = writeln!(
        writer,
        "{} {} {}",
        FAILURE_MARK.red(),
        total,
        if total == 1 { "problem" } else { "problems" }.red()
    );
}

/// Print a success message when no diagnostics are found.
pub fn print_success(files: usize) {
    print_success_to(files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print errors the engine surfaced instead of returning, once each.
pub fn print_notices(messages: &[String]) {
    print_notices_to(messages, &mut io::stderr().lock());
}

pub fn print_notices_to<W: Write>(messages: &[String], writer: &mut W) {
    let mut printed: Vec<&str> = Vec::new();
    for message in messages {
        if printed.contains(&message.as_str()) {
            continue;
        }
        printed.push(message);
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), message);
    }
}

fn print_item<W: Write>(item: &ReportItem, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "error".bold().red(),
        item.message,
        item.rule.to_string().dimmed().cyan()
    );

    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        item.path,
        item.line,
        item.col
    );

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        item.line.to_string().blue(),
        "|".blue(),
        item.source_line,
        width = max_line_width
    );

    // Caret under the column (1-based)
    let prefix: String = item.source_line.chars().take(item.col - 1).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".red(),
        width = max_line_width,
        padding = caret_padding
    );

    if let Some(help) = &item.help {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "help:".bold().cyan(),
            help,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}
