// Domain Error Types

use super::JobId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Duplicate job id: {0}")]
    DuplicateJobId(JobId),

    #[error("No job id can follow {0}")]
    IdSpaceExhausted(JobId),

    #[error("Price is not a finite number for job {id}: {price}")]
    NonFinitePrice { id: JobId, price: f64 },
}

pub type Result<T> = std::result::Result<T, DomainError>;
