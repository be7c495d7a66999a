use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PRODUCT, DEFAULT_WRAPPER_FILE, RepoRoots, WorkspaceSettings};

pub const CONFIG_FILE_NAME: &str = ".vdiferc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path of the ngconsole repository, relative to the config file.
    #[serde(default)]
    pub ngconsole: Option<String>,
    /// Path of the ngconsole_resources repository, relative to the config file.
    #[serde(default)]
    pub ngconsole_resources: Option<String>,
    #[serde(default = "default_fallback_product")]
    pub fallback_product: String,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_wrapper_file")]
    pub wrapper_file: String,
}

fn default_fallback_product() -> String {
    DEFAULT_PRODUCT.to_string()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/*.min.js"].map(String::from).to_vec()
}

fn default_wrapper_file() -> String {
    DEFAULT_WRAPPER_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ngconsole: None,
            ngconsole_resources: None,
            fallback_product: default_fallback_product(),
            ignores: default_ignores(),
            wrapper_file: default_wrapper_file(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        if self.fallback_product.trim().is_empty() {
            bail!("'fallbackProduct' must not be empty");
        }
        Ok(())
    }

    /// Builds workspace settings. Relative repository paths resolve against
    /// `base_dir`; both repositories must exist.
    pub fn settings(&self, base_dir: &Path) -> Result<WorkspaceSettings> {
        let app = resolve_root(base_dir, self.ngconsole.as_deref(), "ngconsole")?;
        let resources = resolve_root(
            base_dir,
            self.ngconsole_resources.as_deref(),
            "ngconsole_resources",
        )?;

        let mut roots = RepoRoots::new(app, resources);
        roots.fallback_product = self.fallback_product.clone();

        let mut settings = WorkspaceSettings::new(roots);
        settings.ignores = self
            .ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))
            })
            .collect::<Result<_>>()?;
        settings.wrapper_file = PathBuf::from(&self.wrapper_file);
        Ok(settings)
    }
}

fn resolve_root(base_dir: &Path, configured: Option<&str>, name: &str) -> Result<PathBuf> {
    let Some(configured) = configured else {
        bail!(
            "{} repository path is not configured. Set it in {} or pass --{}.",
            name,
            CONFIG_FILE_NAME,
            name.replace('_', "-")
        );
    };
    let path = base_dir.join(configured);
    fs::canonicalize(&path)
        .with_context(|| format!("{} repository not found: {}", name, path.display()))
}

/// Serialized form written by `vdife init`.
pub fn config_json(config: &Config) -> Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative repository paths resolve against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            let base_dir = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
