// Job Store Port (Interface)

use crate::domain::Job;
use crate::error::Result;
use std::path::Path;

/// Persistence interface for a whole job collection
///
/// Implementations work on complete collections: `save` replaces whatever
/// is at `path`, `load` returns every job stored there in file order.
/// File handles must be released before either call returns.
#[cfg_attr(test, mockall::automock)]
pub trait JobStore: Send + Sync {
    /// Write all jobs to `path`, overwriting any existing content
    fn save(&self, path: &Path, jobs: &[Job]) -> Result<()>;

    /// Read every job stored at `path`, preserving order and IDs
    fn load(&self, path: &Path) -> Result<Vec<Job>>;
}
