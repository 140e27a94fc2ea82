//! Errors raised while building circuits.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// A rejected instruction. The circuit is left unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("{op} addresses {qubit}, but the circuit has {width} qubits")]
    UnknownQubit {
        op: &'static str,
        qubit: QubitId,
        width: usize,
    },

    #[error("{op} addresses {clbit}, but the circuit has {width} classical bits")]
    UnknownClbit {
        op: &'static str,
        clbit: ClbitId,
        width: usize,
    },

    #[error("{op} uses {qubit} more than once")]
    RepeatedQubit { op: &'static str, qubit: QubitId },

    /// Operand count does not match the gate's arity.
    #[error("{op} acts on {expected} qubits, {got} given")]
    Arity {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    /// A measurement must pair every qubit with exactly one classical bit.
    #[error("cannot measure {qubits} qubits into {clbits} classical bits")]
    UnpairedMeasure { qubits: usize, clbits: usize },

    #[error("circuit json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IrResult<T> = Result<T, IrError>;
