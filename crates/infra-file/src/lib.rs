// Job Tracker Infrastructure - Flat File Adapter
// Implements: JobStore for `.jobs` files

mod codec;
mod jobs_file;
mod path;

pub use codec::{decode_jobs, encode_jobs};
pub use jobs_file::JobsFileStore;
pub use path::{is_jobs_file, with_jobs_extension, JOBS_EXTENSION};
