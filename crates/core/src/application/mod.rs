// Application Layer - Use cases exposed to the presentation layer

pub mod job_service;

// Re-exports
pub use job_service::{CommandOutcome, JobCommand, JobService};
