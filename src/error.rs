//! Error taxonomy for resource resolution and persistence.
//!
//! Every variant is scoped to the document or operation that triggered it;
//! none of them is fatal to a running session.

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `git` exited non-zero or could not be spawned.
    #[error("git failed in {}: {stderr}", repo.display())]
    Process { repo: PathBuf, stderr: String },

    #[error("can't read git branch for {}", repo.display())]
    NoCurrentBranch { repo: PathBuf },

    #[error("ngconsole branch `{app}` does not match ngconsole_resources branch `{resources}`")]
    BranchMismatch { app: String, resources: String },

    #[error("{} is not an ngconsole document", path.display())]
    NotApplicationDocument { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to save {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
