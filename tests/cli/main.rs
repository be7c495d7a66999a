use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result, bail};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod fix;
mod init;
mod sync;

const BIN_NAME: &str = "vdife";

pub const LANG_JSON: &str = "ngconsole_resources/resources/pkg/e-vdi/lang.json";

/// A temporary directory holding `ngconsole/` and `ngconsole_resources/`
/// side by side, with a `.vdiferc.json` pointing at both.
pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Both repositories on the given branches, with `lang` as the e-vdi
    /// language pack. Returns `None` when git is not installed.
    pub fn with_repos(app_branch: &str, resource_branch: &str, lang: &str) -> Result<Option<Self>> {
        if !git_available() {
            eprintln!("git not found, skipping");
            return Ok(None);
        }

        let test = Self::new()?;
        test.write_file(
            ".vdiferc.json",
            r#"{ "ngconsole": "ngconsole", "ngconsoleResources": "ngconsole_resources" }"#,
        )?;
        test.write_file("ngconsole/index.html", "")?;
        test.write_file(LANG_JSON, lang)?;
        test.init_repo("ngconsole", app_branch)?;
        test.init_repo("ngconsole_resources", resource_branch)?;
        Ok(Some(test))
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn write_bytes(&self, path: &str, content: &[u8]) -> Result<()> {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn remove_file(&self, path: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);
        fs::remove_file(&file_path)
            .with_context(|| format!("Failed to remove file: {}", file_path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        if let Some(path) = env::var_os("PATH") {
            cmd.env("PATH", path); // git is looked up on PATH
        }
        cmd
    }

    fn init_repo(&self, dir: &str, branch: &str) -> Result<()> {
        let repo = self.project_dir.join(dir);
        run_git(&repo, &["init", "-q"])?;
        run_git(&repo, &["checkout", "-q", "-b", branch])?;
        run_git(
            &repo,
            &[
                "-c",
                "user.name=vdife",
                "-c",
                "user.email=vdife@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "-q",
                "--allow-empty",
                "-m",
                "init",
            ],
        )
    }
}

/// Runs a command and returns its exit code and its stdout/stderr as text.
pub fn run(cmd: &mut Command) -> Result<(i32, String, String)> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().context("Failed to run vdife")?;
    Ok((
        status.code().unwrap_or(-1),
        String::from_utf8(stdout)?,
        String::from_utf8(stderr)?,
    ))
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

fn run_git(repo: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).current_dir(repo).output()?;
    if !output.status.success() {
        bail!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}
