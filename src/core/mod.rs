//! Localization consistency engine.
//!
//! - `scan`, `deprecated`: find localize attributes and deprecated calls
//! - `reconcile`: turn occurrences into diagnostics against a language pack
//! - `branch`, `resource`: resolve which `lang.json` a document uses
//! - `cache`: share language packs between open documents
//! - `workspace`: document lifecycle and the actions that edit packs

pub mod branch;
pub mod cache;
pub mod deprecated;
pub mod hover;
pub mod pack;
pub mod reconcile;
pub mod resource;
pub mod scan;
pub mod sync;
pub mod text;
pub mod workspace;

pub use branch::{BranchSource, GitCli, branches_match};
pub use cache::{DocumentId, ResourceCache};
pub use deprecated::{DeprecatedApi, fix_deprecated, scan_deprecated_apis};
pub use hover::{Hover, hover_at};
pub use pack::LanguagePack;
pub use reconcile::{Diagnostic, DiagnosticSource, QuickFix, reconcile};
pub use resource::{DEFAULT_PRODUCT, RepoRoots, ResourceId, resolve_resource_file};
pub use scan::{Classification, Occurrence, OccurrenceKind, scan_localization_keys};
pub use sync::{SyncOutcome, parse_entry, sync_keys};
pub use text::{LineIndex, Position};
pub use workspace::{
    DEFAULT_WRAPPER_FILE, Document, Language, Notification, TextEdit, Workspace,
    WorkspaceSettings,
};
