// Job Service - Core use cases for job management

pub mod command;

pub use command::{CommandOutcome, JobCommand};

use crate::domain::{Job, JobId, JobRegister, JobUpdate, NewJob};
use crate::error::{AppError, Result};
use crate::port::JobStore;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Job Service
///
/// Owns the register for the lifetime of the process and routes every
/// user action to exactly one register operation.
pub struct JobService {
    register: JobRegister,
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self::with_register(JobRegister::new(), store)
    }

    pub fn with_register(register: JobRegister, store: Arc<dyn JobStore>) -> Self {
        Self { register, store }
    }

    /// Read-only view of the current jobs, in insertion order
    pub fn list(&self) -> &[Job] {
        self.register.jobs()
    }

    pub fn get(&self, id: JobId) -> Result<&Job> {
        self.register.get_job(id)
    }

    pub fn register(&self) -> &JobRegister {
        &self.register
    }

    /// Add a job, returning its assigned ID
    pub fn add(&mut self, new: NewJob) -> Result<JobId> {
        self.register.add_job(new)
    }

    /// Edit an existing job. An update with no fields set is rejected.
    pub fn edit(&mut self, id: JobId, update: &JobUpdate) -> Result<&Job> {
        if update.is_empty() {
            warn!(job_id = id, "Edit rejected: no fields to change");
            return Err(AppError::Validation(format!(
                "edit of job {} changes no fields",
                id
            )));
        }
        self.register.update_job(id, update)
    }

    pub fn delete(&mut self, id: JobId) -> Result<Job> {
        self.register.remove_job(id)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.register.save_jobs_to_file(self.store.as_ref(), path)
    }

    /// Replace the register with the contents of `path` (all-or-nothing)
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        self.register.load_jobs_from_file(self.store.as_ref(), path)
    }

    /// Execute one user command
    pub fn dispatch(&mut self, command: JobCommand) -> Result<CommandOutcome> {
        command::execute(self, command)
    }
}
