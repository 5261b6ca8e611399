// Domain Layer - Pure business logic and entities

pub mod error;
pub mod job;
pub mod register;

// Re-exports
pub use error::DomainError;
pub use job::{Job, JobId, JobUpdate, NewJob};
pub use register::JobRegister;
