// `.jobs` path helpers

use std::path::{Path, PathBuf};

/// Conventional extension for job files
pub const JOBS_EXTENSION: &str = "jobs";

/// Append `.jobs` when the path has no extension at all.
/// Paths that already carry an extension are returned unchanged.
pub fn with_jobs_extension(path: impl Into<PathBuf>) -> PathBuf {
    let mut path = path.into();
    if path.extension().is_none() {
        path.set_extension(JOBS_EXTENSION);
    }
    path
}

/// True when the path is not a directory and ends in `.jobs`
pub fn is_jobs_file(path: &Path) -> bool {
    !path.is_dir() && path.extension().is_some_and(|ext| ext == JOBS_EXTENSION)
}
