//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per subcommand.

mod bump;
mod classify;

pub use bump::{run_bump, BumpCommand};
pub use classify::{run_classify, ClassifyCommand};

use std::path::PathBuf;

/// The two snapshot files a command compares.
#[derive(Debug, Clone)]
pub struct RevisionPaths {
    /// Last committed snapshot
    pub previous: PathBuf,
    /// Edited, not yet committed snapshot
    pub current: PathBuf,
    /// Catalog table used to resolve component references
    pub catalog: Option<PathBuf>,
}
