// Job Register - in-memory collection and ID allocation

use super::error::DomainError;
use super::job::{Job, JobId, JobUpdate, NewJob};
use crate::error::{AppError, Result};
use crate::port::JobStore;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

const FIRST_JOB_ID: JobId = 1;

/// Ordered collection of jobs (insertion order) plus the next-ID counter.
///
/// IDs are handed out sequentially and never reused within a register,
/// even after the job holding them is removed.
#[derive(Debug, Clone)]
pub struct JobRegister {
    jobs: Vec<Job>,
    next_id: JobId,
}

impl Default for JobRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegister {
    /// Create an empty register
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: FIRST_JOB_ID,
        }
    }

    /// Build a register from an existing collection, keeping its IDs and order.
    ///
    /// The counter resumes one past the highest ID present; a collection
    /// holding `JobId::MAX` is rejected since no ID can follow it.
    pub fn from_jobs(jobs: Vec<Job>) -> std::result::Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(jobs.len());
        for job in &jobs {
            if !seen.insert(job.id()) {
                return Err(DomainError::DuplicateJobId(job.id()));
            }
        }

        let next_id = match jobs.iter().map(Job::id).max() {
            None => FIRST_JOB_ID,
            Some(max) => max
                .checked_add(1)
                .ok_or(DomainError::IdSpaceExhausted(max))?,
        };

        Ok(Self { jobs, next_id })
    }

    /// Append a new job and return its freshly allocated ID.
    ///
    /// Fails only when the ID space is used up; the counter never wraps.
    pub fn add_job(&mut self, new: NewJob) -> Result<JobId> {
        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            warn!(job_id = id, "Add rejected: job ids exhausted");
            return Err(DomainError::IdSpaceExhausted(id).into());
        };
        self.next_id = next_id;
        self.jobs.push(Job::from_new(id, new));

        info!(job_id = id, total = self.jobs.len(), "Job added");
        Ok(id)
    }

    /// Current contents in insertion order
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Owned copy of the current contents
    pub fn snapshot(&self) -> Vec<Job> {
        self.jobs.clone()
    }

    pub fn get_job(&self, id: JobId) -> Result<&Job> {
        debug!(job_id = id, "Looking up job");
        self.position(id)
            .map(|idx| &self.jobs[idx])
            .ok_or(AppError::NotFound(id))
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.position(id).is_some()
    }

    /// Remove the job with `id`, returning it. Remaining jobs keep their IDs.
    pub fn remove_job(&mut self, id: JobId) -> Result<Job> {
        let Some(idx) = self.position(id) else {
            warn!(job_id = id, "Remove rejected: job not found");
            return Err(AppError::NotFound(id));
        };

        let removed = self.jobs.remove(idx);
        info!(job_id = id, total = self.jobs.len(), "Job removed");
        Ok(removed)
    }

    /// Apply `update` to the job with `id` in place
    pub fn update_job(&mut self, id: JobId, update: &JobUpdate) -> Result<&Job> {
        let Some(idx) = self.position(id) else {
            warn!(job_id = id, "Update rejected: job not found");
            return Err(AppError::NotFound(id));
        };

        self.jobs[idx].apply(update);
        info!(job_id = id, "Job updated");
        Ok(&self.jobs[idx])
    }

    /// Write the whole collection to `path` through `store`
    pub fn save_jobs_to_file(&self, store: &dyn JobStore, path: &Path) -> Result<()> {
        store.save(path, &self.jobs)?;
        info!(path = %path.display(), count = self.jobs.len(), "Jobs saved");
        Ok(())
    }

    /// Replace the collection with the contents of `path`.
    ///
    /// The file is fully parsed before anything is swapped in, so on error
    /// the register is left exactly as it was. Returns the number of jobs loaded.
    pub fn load_jobs_from_file(&mut self, store: &dyn JobStore, path: &Path) -> Result<usize> {
        let loaded = store.load(path)?;
        let replacement = Self::from_jobs(loaded)?;

        *self = replacement;
        info!(
            path = %path.display(),
            count = self.jobs.len(),
            next_id = self.next_id,
            "Jobs loaded"
        );
        Ok(self.jobs.len())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// ID the next `add_job` call will return
    pub fn next_id(&self) -> JobId {
        self.next_id
    }

    fn position(&self, id: JobId) -> Option<usize> {
        self.jobs.iter().position(|job| job.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::job_store::MockJobStore;
    use crate::ErrorKind;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_job(name: &str, details: &str, price: f64, day: u32, completed: bool, paid: bool) -> NewJob {
        NewJob {
            name: name.to_string(),
            details: details.to_string(),
            price,
            date: date(2024, 1, day),
            completed,
            paid,
        }
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut register = JobRegister::new();
        for expected in 1..=5 {
            let id = register.add_job(new_job("Client", "Work", 10.0, 1, false, false)).unwrap();
            assert_eq!(id, expected);
        }
        assert_eq!(register.next_id(), 6);
    }

    #[test]
    fn test_get_after_add_matches_submission() {
        let mut register = JobRegister::new();
        let submitted = new_job("Alice", "Fix sink", 150.0, 5, false, true);
        let id = register.add_job(submitted.clone()).unwrap();

        let job = register.get_job(id).unwrap();
        assert_eq!(job.id(), id);
        assert_eq!(job.name(), submitted.name);
        assert_eq!(job.details(), submitted.details);
        assert_eq!(job.price(), submitted.price);
        assert_eq!(job.date(), submitted.date);
        assert_eq!(job.is_completed(), submitted.completed);
        assert_eq!(job.is_paid(), submitted.paid);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut register = JobRegister::new();
        assert_eq!(register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap(), 1);
        assert_eq!(register.add_job(new_job("Bob", "Paint wall", 300.0, 6, false, true)).unwrap(), 2);

        register.remove_job(1).unwrap();

        assert_eq!(register.add_job(new_job("Carl", "Tile floor", 500.0, 7, true, true)).unwrap(), 3);

        let ids: Vec<JobId> = register.jobs().iter().map(Job::id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(register.jobs()[0].name(), "Bob");
        assert_eq!(register.jobs()[1].name(), "Carl");
    }

    #[test]
    fn test_remove_then_get_is_not_found() {
        let mut register = JobRegister::new();
        let id = register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();

        let removed = register.remove_job(id).unwrap();
        assert_eq!(removed.name(), "Alice");

        let err = register.get_job(id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(register.is_empty());
    }

    #[test]
    fn test_remove_missing_has_no_side_effect() {
        let mut register = JobRegister::new();
        register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();
        let before = register.snapshot();

        let err = register.remove_job(99).unwrap_err();
        assert!(matches!(err, AppError::NotFound(99)));
        assert_eq!(register.snapshot(), before);
        assert_eq!(register.next_id(), 2);
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut register = JobRegister::new();
        let id = register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();
        register.add_job(new_job("Bob", "Paint wall", 300.0, 6, false, true)).unwrap();

        let update = JobUpdate {
            completed: Some(true),
            details: Some("Fix sink and tap".to_string()),
            ..Default::default()
        };
        let updated = register.update_job(id, &update).unwrap();
        assert_eq!(updated.id(), id);

        let job = register.get_job(id).unwrap();
        assert_eq!(job.name(), "Alice");
        assert_eq!(job.details(), "Fix sink and tap");
        assert_eq!(job.price(), 150.0);
        assert!(job.is_completed());
        assert!(!job.is_paid());

        // Neighbour untouched
        assert_eq!(register.get_job(2).unwrap().details(), "Paint wall");
    }

    #[test]
    fn test_update_missing_has_no_side_effect() {
        let mut register = JobRegister::new();
        register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();
        let before = register.snapshot();

        let update = JobUpdate {
            paid: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            register.update_job(7, &update),
            Err(AppError::NotFound(7))
        ));
        assert_eq!(register.snapshot(), before);
    }

    #[test]
    fn test_from_jobs_restores_counter() {
        let jobs = vec![
            Job::new(4, "Dana", "Hang door", 80.0, date(2024, 3, 1), false, false),
            Job::new(9, "Eve", "Fix roof", 900.0, date(2024, 3, 2), true, false),
            Job::new(2, "Fay", "Clean gutters", 60.0, date(2024, 3, 3), true, true),
        ];
        let mut register = JobRegister::from_jobs(jobs.clone()).unwrap();

        assert_eq!(register.jobs(), jobs.as_slice());
        assert_eq!(register.next_id(), 10);
        assert_eq!(register.add_job(new_job("Gus", "Lay bricks", 1.0, 9, false, false)).unwrap(), 10);
    }

    #[test]
    fn test_from_jobs_empty() {
        let register = JobRegister::from_jobs(Vec::new()).unwrap();
        assert!(register.is_empty());
        assert_eq!(register.next_id(), 1);
    }

    #[test]
    fn test_from_jobs_rejects_duplicate_ids() {
        let jobs = vec![
            Job::new(1, "A", "x", 1.0, date(2024, 1, 1), false, false),
            Job::new(1, "B", "y", 2.0, date(2024, 1, 2), false, false),
        ];
        assert_eq!(
            JobRegister::from_jobs(jobs).unwrap_err(),
            DomainError::DuplicateJobId(1)
        );
    }

    #[test]
    fn test_from_jobs_rejects_highest_possible_id() {
        let jobs = vec![Job::new(JobId::MAX, "Max", "Last", 1.0, date(2024, 1, 1), false, false)];
        assert_eq!(
            JobRegister::from_jobs(jobs).unwrap_err(),
            DomainError::IdSpaceExhausted(JobId::MAX)
        );
    }

    #[test]
    fn test_add_never_wraps_the_counter() {
        let last = JobId::MAX - 1;
        let jobs = vec![Job::new(last, "Near", "End", 1.0, date(2024, 1, 1), false, false)];
        let mut register = JobRegister::from_jobs(jobs).unwrap();
        assert_eq!(register.next_id(), JobId::MAX);
        let before = register.snapshot();

        let err = register
            .add_job(new_job("Over", "Flow", 1.0, 2, false, false))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::IdSpaceExhausted(JobId::MAX))
        ));
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(register.snapshot(), before);
        assert_eq!(register.next_id(), JobId::MAX);
    }

    #[test]
    fn test_save_passes_all_jobs_to_store() {
        let mut register = JobRegister::new();
        register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();
        register.add_job(new_job("Bob", "Paint wall", 300.0, 6, false, true)).unwrap();

        let mut store = MockJobStore::new();
        store
            .expect_save()
            .withf(|path, jobs| {
                path == Path::new("out.jobs") && jobs.len() == 2 && jobs[1].name() == "Bob"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        register
            .save_jobs_to_file(&store, Path::new("out.jobs"))
            .unwrap();
    }

    #[test]
    fn test_save_surfaces_io_failure() {
        let register = JobRegister::new();
        let mut store = MockJobStore::new();
        store.expect_save().returning(|path, _| {
            Err(AppError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        });

        let err = register
            .save_jobs_to_file(&store, Path::new("/root/locked.jobs"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut register = JobRegister::new();
        register.add_job(new_job("Old", "Gone after load", 1.0, 1, false, false)).unwrap();

        let mut store = MockJobStore::new();
        store.expect_load().times(1).returning(|_| {
            Ok(vec![
                Job::new(5, "Bob", "Paint wall", 300.0, date(2024, 1, 6), false, true),
                Job::new(7, "Carl", "Tile floor", 500.0, date(2024, 1, 7), true, true),
            ])
        });

        let count = register
            .load_jobs_from_file(&store, Path::new("in.jobs"))
            .unwrap();
        assert_eq!(count, 2);

        let ids: Vec<JobId> = register.jobs().iter().map(Job::id).collect();
        assert_eq!(ids, vec![5, 7]);
        assert_eq!(register.add_job(new_job("Dan", "New", 1.0, 8, false, false)).unwrap(), 8);
    }

    #[test]
    fn test_failed_load_leaves_register_unchanged() {
        let mut register = JobRegister::new();
        register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();
        register.add_job(new_job("Bob", "Paint wall", 300.0, 6, false, true)).unwrap();
        let before = register.snapshot();

        let mut store = MockJobStore::new();
        store
            .expect_load()
            .returning(|_| Err(AppError::parse(2, "price is not a number")));

        let err = register
            .load_jobs_from_file(&store, &PathBuf::from("bad.jobs"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(register.snapshot(), before);
        assert_eq!(register.next_id(), 3);
    }

    #[test]
    fn test_load_with_duplicate_ids_leaves_register_unchanged() {
        let mut register = JobRegister::new();
        register.add_job(new_job("Alice", "Fix sink", 150.0, 5, false, false)).unwrap();
        let before = register.snapshot();

        let mut store = MockJobStore::new();
        store.expect_load().returning(|_| {
            Ok(vec![
                Job::new(3, "A", "x", 1.0, date(2024, 1, 1), false, false),
                Job::new(3, "B", "y", 2.0, date(2024, 1, 2), false, false),
            ])
        });

        let err = register
            .load_jobs_from_file(&store, Path::new("dup.jobs"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::DuplicateJobId(3))
        ));
        assert_eq!(register.snapshot(), before);
    }
}
