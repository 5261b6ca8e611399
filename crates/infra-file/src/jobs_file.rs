// Flat-file JobStore Implementation

use crate::codec::{decode_jobs, encode_jobs};
use jobtracker_core::domain::Job;
use jobtracker_core::error::{AppError, Result};
use jobtracker_core::port::JobStore;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Stores job collections in `.jobs` files on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct JobsFileStore;

impl JobsFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl JobStore for JobsFileStore {
    fn save(&self, path: &Path, jobs: &[Job]) -> Result<()> {
        // Encode first: an unrepresentable job must not truncate the target
        let contents = encode_jobs(jobs)?;

        let file = File::create(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot create jobs file");
            AppError::io(path, e)
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::io(path, e))?;
        writer.flush().map_err(|e| AppError::io(path, e))?;

        debug!(path = %path.display(), bytes = contents.len(), "Jobs file written");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Vec<Job>> {
        let mut file = File::open(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot open jobs file");
            AppError::io(path, e)
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| AppError::io(path, e))?;
        drop(file);

        let text = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
            AppError::parse(line, "invalid UTF-8")
        })?;

        let jobs = decode_jobs(&text)?;
        debug!(path = %path.display(), count = jobs.len(), "Jobs file read");
        Ok(jobs)
    }
}
