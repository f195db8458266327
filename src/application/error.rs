//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::ContractViolation;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
