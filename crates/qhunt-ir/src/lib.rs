//! Circuits as plain data.
//!
//! A [`Circuit`] is a fixed set of qubits and classical bits plus an
//! append-only list of [`Instruction`]s. Nothing here simulates anything;
//! backends in `qhunt-hal` consume circuits and return counts.
//!
//! ```
//! use qhunt_ir::{Circuit, QubitId};
//!
//! // Flip the phase of |111⟩ with H-MCX-H on the last qubit.
//! let mut circuit = Circuit::with_size("flip", 3, 0);
//! let last = QubitId(2);
//! circuit.h(last)?;
//! circuit.mcx(&[QubitId(0), QubitId(1)], last)?;
//! circuit.h(last)?;
//!
//! assert_eq!(circuit.count_ops()["mcx"], 1);
//! assert_eq!(circuit.instructions()[1].qubits.last(), Some(&last));
//! # Ok::<(), qhunt_ir::IrError>(())
//! ```
//!
//! Gate set: `id x y z h s sdg t tdg p rz cx cz cp swap ccx mcx`, plus
//! `measure` and `barrier`.

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
