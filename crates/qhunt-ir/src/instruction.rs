//! One step of a circuit and the wires it touches.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    Gate(Gate),
    /// Reads `qubits[i]` into `clbits[i]`.
    Measure,
    /// Orders the wires it touches; no effect on the state.
    Barrier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// X on `target`, conditioned on every qubit in `controls`.
    pub fn mcx(controls: &[QubitId], target: QubitId) -> Self {
        let mut qubits = controls.to_vec();
        qubits.push(target);
        let num_controls = controls.len() as u32;
        Self::gate(StandardGate::MCX { num_controls }, qubits)
    }

    /// Pairwise measurement of `qubits` into `clbits`.
    pub fn measure(qubits: Vec<QubitId>, clbits: Vec<ClbitId>) -> IrResult<Self> {
        if qubits.len() != clbits.len() {
            return Err(IrError::UnpairedMeasure {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Gate mnemonic, `"measure"` or `"barrier"`.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcx_puts_target_last() {
        let inst = Instruction::mcx(&[QubitId(2), QubitId(0)], QubitId(1));
        assert_eq!(inst.qubits, [QubitId(2), QubitId(0), QubitId(1)]);
        assert_eq!(inst.as_gate().map(Gate::arity), Some(3));
    }

    #[test]
    fn test_measure_pairs_wires() {
        let inst = Instruction::measure(vec![QubitId(1)], vec![ClbitId(0)]).unwrap();
        assert!(inst.is_measure());
        assert_eq!(inst.name(), "measure");

        assert!(matches!(
            Instruction::measure(vec![QubitId(0), QubitId(1)], vec![ClbitId(0)]),
            Err(IrError::UnpairedMeasure { qubits: 2, clbits: 1 })
        ));
    }

    #[test]
    fn test_barrier_is_not_a_gate() {
        let inst = Instruction::barrier([QubitId(0), QubitId(3)]);
        assert!(inst.is_barrier());
        assert!(inst.as_gate().is_none());
    }
}
