//! HAL error type.

use thiserror::Error;

/// Failure anywhere between submitting a circuit and reading its counts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    #[error("backend '{0}' is not accepting jobs")]
    BackendUnavailable(String),

    #[error("circuit rejected: {0}")]
    InvalidCircuit(String),

    #[error("circuit does not fit the backend: {0}")]
    CircuitTooLarge(String),

    #[error("invalid shot count: {0}")]
    InvalidShots(String),

    #[error("no job with id {0}")]
    JobNotFound(String),

    #[error("job failed: {0}")]
    JobFailed(String),

    #[error("job was cancelled")]
    JobCancelled,

    #[error("gave up waiting for job {0}")]
    Timeout(String),

    #[error("bad backend configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias for backend operations.
pub type HalResult<T> = Result<T, HalError>;
