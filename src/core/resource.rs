//! Maps an application document to the language pack file its branch uses.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use super::branch::{BranchSource, branches_match};
use crate::error::{Error, Result};

/// Product used when the ngconsole branch carries no OEM name.
pub const DEFAULT_PRODUCT: &str = "e-vdi";

/// Roots of the two repositories, fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoots {
    /// The ngconsole (application) repository.
    pub app: PathBuf,
    /// The ngconsole_resources repository.
    pub resources: PathBuf,
    pub fallback_product: String,
}

impl RepoRoots {
    pub fn new(app: impl Into<PathBuf>, resources: impl Into<PathBuf>) -> Self {
        Self {
            app: app.into(),
            resources: resources.into(),
            fallback_product: DEFAULT_PRODUCT.to_string(),
        }
    }

    pub fn contains_document(&self, path: &Path) -> bool {
        path.starts_with(&self.app)
    }

    /// `{resources}/resources/pkg/{product}/lang.json`
    pub fn resource_file(&self, product: &str) -> ResourceId {
        ResourceId(
            self.resources
                .join("resources")
                .join("pkg")
                .join(product)
                .join("lang.json"),
        )
    }
}

/// Resolved path of a `lang.json` file; the cache key for its language pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(PathBuf);

impl ResourceId {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Product name embedded in an ngconsole branch.
///
/// `2.3-OEM-foo` yields `foo`; anything without a third segment yields
/// `fallback`.
pub fn product_name<'a>(app_branch: &'a str, fallback: &'a str) -> &'a str {
    match app_branch.split('-').collect::<Vec<_>>().as_slice() {
        [_, _, name] => *name,
        _ => fallback,
    }
}

/// Resolves both branches, checks they match and derives the resource file.
pub async fn resolve_resource_file<B>(roots: &RepoRoots, branches: &B) -> Result<ResourceId>
where
    B: BranchSource + ?Sized,
{
    let (app_branch, resource_branch) = tokio::join!(
        branches.current_branch(&roots.app),
        branches.current_branch(&roots.resources)
    );
    let (app_branch, resource_branch) = (app_branch?, resource_branch?);

    if !branches_match(&app_branch, &resource_branch) {
        return Err(Error::BranchMismatch {
            app: app_branch,
            resources: resource_branch,
        });
    }

    Ok(roots.resource_file(product_name(&app_branch, &roots.fallback_product)))
}
