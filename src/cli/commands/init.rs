use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, config_json};

/// Checkout directory names looked for next to the new config.
const NGCONSOLE_DIR: &str = "ngconsole";
const RESOURCES_DIR: &str = "ngconsole_resources";

/// Writes `.vdiferc.json` in the working directory. Repository paths are
/// prefilled for checkouts found under their usual names.
pub fn init() -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    let config = Config {
        ngconsole: detect_checkout(&cwd, NGCONSOLE_DIR),
        ngconsole_resources: detect_checkout(&cwd, RESOURCES_DIR),
        ..Default::default()
    };
    fs::write(&config_path, config_json(&config)?)
        .with_context(|| format!("Failed to write file: {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    let unset: Vec<String> = [
        ("ngconsole", &config.ngconsole),
        ("ngconsoleResources", &config.ngconsole_resources),
    ]
    .into_iter()
    .filter(|(_, path)| path.is_none())
    .map(|(field, _)| format!("\"{}\"", field))
    .collect();
    if !unset.is_empty() {
        println!("Set {} to your repository paths.", unset.join(" and "));
    }

    Ok(ExitStatus::Success)
}

fn detect_checkout(dir: &Path, name: &str) -> Option<String> {
    dir.join(name).is_dir().then(|| name.to_string())
}
