use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): nothing to report
/// - `Failure` (1): diagnostics found, or the command was given unusable input
/// - `Error` (2): the command could not run (config, git, unreadable files)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// The more severe of two statuses.
    pub fn max(self, other: ExitStatus) -> ExitStatus {
        match (self, other) {
            (ExitStatus::Error, _) | (_, ExitStatus::Error) => ExitStatus::Error,
            (ExitStatus::Failure, _) | (_, ExitStatus::Failure) => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
