//! Error types for the demo core.

use std::path::PathBuf;

use qhunt_hal::HalError;
use qhunt_ir::IrError;
use thiserror::Error;

/// Errors raised while building or running a demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Target pattern has the wrong length or a non-binary character.
    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Measured bit string could not be decoded.
    #[error("Invalid bit string '{0}'")]
    InvalidBitstring(String),

    /// Phase outside `[0, 1)`.
    #[error("Invalid phase {0}: expected a value in [0, 1)")]
    InvalidPhase(f64),

    /// Phase estimation needs at least one counting qubit.
    #[error("At least one counting qubit is required")]
    NoCountingQubits,

    /// Circuit width differs from the width an operation was built for.
    #[error("Qubit count mismatch: circuit has {circuit} qubits, expected {expected}")]
    QubitCountMismatch { circuit: usize, expected: usize },

    /// Level data names a generation rule that does not exist.
    #[error("Unknown target rule '{0}'")]
    UnknownRule(String),

    /// No level with the requested number.
    #[error("Level {0} not found")]
    UnknownLevel(u32),

    /// Level file could not be read.
    #[error("Failed to read levels from {}: {source}", .path.display())]
    LevelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Level file is not valid level JSON.
    #[error("Invalid level data: {0}")]
    LevelFormat(#[from] serde_json::Error),

    #[error(transparent)]
    Ir(#[from] IrError),

    #[error(transparent)]
    Hal(#[from] HalError),
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
