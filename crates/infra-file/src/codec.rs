// `.jobs` line codec
//
// One job per line, each line a compact JSON array with seven positional
// fields: [id, name, details, price, date, completed, paid]
//
//   [1,"Alice","Fix sink",150.0,"2024-01-05",false,false]
//
// Text fields use JSON string escaping, so delimiters and newlines inside
// names or details survive a round trip. Blank lines are ignored on decode.

use chrono::NaiveDate;
use jobtracker_core::domain::{Job, JobId};
use jobtracker_core::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize)]
struct LineRef<'a>(JobId, &'a str, &'a str, f64, NaiveDate, bool, bool);

#[derive(Deserialize)]
struct Line(JobId, String, String, f64, NaiveDate, bool, bool);

impl<'a> From<&'a Job> for LineRef<'a> {
    fn from(job: &'a Job) -> Self {
        LineRef(
            job.id(),
            job.name(),
            job.details(),
            job.price(),
            job.date(),
            job.is_completed(),
            job.is_paid(),
        )
    }
}

impl From<Line> for Job {
    fn from(line: Line) -> Self {
        let Line(id, name, details, price, date, completed, paid) = line;
        Job::new(id, name, details, price, date, completed, paid)
    }
}

/// Encode every job, one line each, terminated by `\n`.
///
/// Fails without producing output if any job cannot be represented.
pub fn encode_jobs(jobs: &[Job]) -> Result<String> {
    let mut out = String::new();
    for job in jobs {
        job.ensure_persistable()?;
        let line = serde_json::to_string(&LineRef::from(job))
            .map_err(|e| AppError::Validation(format!("job {}: {}", job.id(), e)))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Decode a whole file's contents.
///
/// Line numbers in errors are 1-based. Duplicate IDs are rejected.
pub fn decode_jobs(text: &str) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let line: Line =
            serde_json::from_str(raw).map_err(|e| AppError::parse(line_no, e.to_string()))?;

        if !seen.insert(line.0) {
            return Err(AppError::parse(
                line_no,
                format!("duplicate job id {}", line.0),
            ));
        }
        jobs.push(Job::from(line));
    }

    Ok(jobs)
}
