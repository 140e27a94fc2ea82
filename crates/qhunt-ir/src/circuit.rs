//! The append-only circuit builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// An ordered list of instructions over `num_qubits` qubits and
/// `num_clbits` classical bits.
///
/// Every builder method checks its operands first; a rejected instruction
/// leaves the circuit untouched. Methods return `&mut Self` so calls chain:
///
/// ```
/// # use qhunt_ir::{Circuit, QubitId};
/// let mut circuit = Circuit::with_size("pair", 2, 0);
/// circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
/// assert_eq!(circuit.depth(), 2);
/// # Ok::<(), qhunt_ir::IrError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    /// Check `instruction` against the circuit's wires and append it.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let op = instruction.name();

        if let Some(gate) = instruction.as_gate() {
            if gate.arity() != instruction.qubits.len() {
                return Err(IrError::Arity {
                    op,
                    expected: gate.arity(),
                    got: instruction.qubits.len(),
                });
            }
        }

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.index() >= self.num_qubits() {
                return Err(IrError::UnknownQubit {
                    op,
                    qubit,
                    width: self.num_qubits(),
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::RepeatedQubit { op, qubit });
            }
        }

        if let Some(&clbit) = instruction
            .clbits
            .iter()
            .find(|c| c.index() >= self.num_clbits())
        {
            return Err(IrError::UnknownClbit {
                op,
                clbit,
                width: self.num_clbits(),
            });
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    fn one(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, [qubit]))
    }

    fn two(&mut self, gate: StandardGate, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, [a, b]))
    }

    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::H, qubit)
    }

    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::X, qubit)
    }

    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Y, qubit)
    }

    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Z, qubit)
    }

    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::S, qubit)
    }

    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Sdg, qubit)
    }

    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::T, qubit)
    }

    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Tdg, qubit)
    }

    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::P(theta), qubit)
    }

    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Rz(theta), qubit)
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::CX, control, target)
    }

    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::CZ, control, target)
    }

    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::CP(theta), control, target)
    }

    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::Swap, a, b)
    }

    pub fn ccx(&mut self, c0: QubitId, c1: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::CCX, [c0, c1, target]))
    }

    /// X on `target` controlled by all of `controls`; a bare X when
    /// `controls` is empty.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::mcx(controls, target))
    }

    /// Append any gate, e.g. a labelled one.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(vec![qubit], vec![clbit])?)
    }

    /// Measure qubit `i` into classical bit `i` for every qubit, adding
    /// classical bits if there are too few.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        self.num_clbits = self.num_clbits.max(self.num_qubits);
        let qubits = (0..self.num_qubits).map(QubitId).collect();
        let clbits = (0..self.num_qubits).map(ClbitId).collect();
        self.push(Instruction::measure(qubits, clbits)?)
    }

    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.barrier((0..self.num_qubits).map(QubitId))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    fn ops(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().filter(|inst| !inst.is_barrier())
    }

    /// Instruction count without barriers.
    pub fn num_ops(&self) -> usize {
        self.ops().count()
    }

    /// Instruction count per name, without barriers.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        self.ops().fold(BTreeMap::new(), |mut counts, inst| {
            *counts.entry(inst.name().to_owned()).or_default() += 1;
            counts
        })
    }

    /// Length of the longest chain of instructions sharing a wire.
    ///
    /// Classical bits count as wires. A barrier lines up the wires it spans
    /// without adding a layer of its own.
    pub fn depth(&self) -> usize {
        let nq = self.num_qubits();
        let mut layer = vec![0usize; nq + self.num_clbits()];

        for inst in &self.instructions {
            let wires: Vec<usize> = inst
                .qubits
                .iter()
                .map(|q| q.index())
                .chain(inst.clbits.iter().map(|c| nq + c.index()))
                .collect();
            let reached = wires.iter().map(|&w| layer[w]).max().unwrap_or(0);
            let next = if inst.is_barrier() { reached } else { reached + 1 };
            for w in wires {
                layer[w] = next;
            }
        }

        layer.into_iter().max().unwrap_or(0)
    }

    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `H(0) CX(0,1)`, both qubits measured.
    pub fn bell() -> IrResult<Self> {
        Self::ghz(2).map(|mut c| {
            c.name = "bell".into();
            c
        })
    }

    /// `n`-qubit GHZ state, every qubit measured into its own bit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(format!("ghz_{n}"), n, n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for q in 1..n {
            circuit.cx(QubitId(q - 1), QubitId(q))?;
        }
        for q in 0..n {
            circuit.measure(QubitId(q), ClbitId(q))?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let circuit = Circuit::new("empty");
        assert_eq!(circuit.name(), "empty");
        assert_eq!((circuit.num_qubits(), circuit.num_clbits()), (0, 0));
        assert_eq!(circuit.depth(), 0);
        assert!(circuit.count_ops().is_empty());
    }

    #[test]
    fn test_bell_and_ghz() {
        let bell = Circuit::bell().unwrap();
        assert_eq!(bell.name(), "bell");
        // H, CX, then both measures side by side
        assert_eq!(bell.depth(), 3);
        assert_eq!(bell.num_ops(), 4);

        let ghz = Circuit::ghz(5).unwrap();
        assert_eq!(ghz.num_clbits(), 5);
        assert_eq!(ghz.count_ops()["cx"], 4);
        assert_eq!(ghz.depth(), 6);
    }

    #[test]
    fn test_rejected_instruction_leaves_circuit_unchanged() {
        let mut circuit = Circuit::with_size("checks", 3, 1);

        assert!(matches!(
            circuit.h(QubitId(3)),
            Err(IrError::UnknownQubit { op: "h", width: 3, .. })
        ));
        assert!(matches!(
            circuit.measure(QubitId(0), ClbitId(1)),
            Err(IrError::UnknownClbit { clbit: ClbitId(1), .. })
        ));
        assert!(matches!(
            circuit.mcx(&[QubitId(0), QubitId(2)], QubitId(2)),
            Err(IrError::RepeatedQubit { op: "mcx", qubit: QubitId(2) })
        ));
        assert!(matches!(
            circuit.gate(StandardGate::CZ, [QubitId(0)]),
            Err(IrError::Arity { expected: 2, got: 1, .. })
        ));

        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_error_messages() {
        let mut circuit = Circuit::with_size("checks", 2, 0);
        let err = circuit.cp(0.1, QubitId(0), QubitId(4)).unwrap_err();
        assert_eq!(err.to_string(), "cp addresses q4, but the circuit has 2 qubits");
    }

    #[test]
    fn test_barrier_aligns_without_a_layer() {
        let mut circuit = Circuit::with_size("b", 2, 0);
        circuit.h(QubitId(0)).unwrap().h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.x(QubitId(1)).unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.num_ops(), 3);
        assert!(!circuit.count_ops().contains_key("barrier"));
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("m", 3, 1);
        circuit.measure_all().unwrap();

        assert_eq!(circuit.num_clbits(), 3);
        let inst = &circuit.instructions()[0];
        assert_eq!(inst.clbits, [ClbitId(0), ClbitId(1), ClbitId(2)]);
    }

    #[test]
    fn test_json() {
        let circuit = Circuit::bell().unwrap();
        let json = circuit.to_json().unwrap();
        assert!(json.contains("\"CX\""));

        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count_ops(), circuit.count_ops());
        assert_eq!(back.depth(), circuit.depth());
    }
}
