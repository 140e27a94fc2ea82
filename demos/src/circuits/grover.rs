//! Grover's search algorithm circuit generator.
//!
//! Grover's algorithm finds a marked item in an unstructured database
//! with O(sqrt(N)) queries, compared to O(N) classically.
//!
//! Qubit `i` is measured into classical bit `i`, and bit strings are written
//! with the highest classical bit first. [`mark`] therefore reads the target
//! right to left, so the bit string a backend reports for the marked state is
//! the target string itself.

use std::fmt;
use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qhunt_hal::{Backend, Counts, HalError};
use qhunt_ir::{Circuit, ClbitId, Gate, QubitId, StandardGate};

use crate::error::{DemoError, DemoResult};

/// A bit pattern naming the single marked basis state.
///
/// Only [`Target::parse`] (or [`FromStr`]) can build one, so every `Target`
/// is 1 to [`Target::MAX_WIDTH`] bits of `'0'` and `'1'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Target(String);

impl Target {
    /// Width used by the treasure hunt.
    pub const DEFAULT_WIDTH: usize = 4;

    /// Widest searchable target. A statevector over this many qubits
    /// already takes 16 MiB.
    pub const MAX_WIDTH: usize = 20;

    /// Reject widths no circuit could be built for.
    pub fn check_width(target: &str, width: usize) -> DemoResult<()> {
        if (1..=Self::MAX_WIDTH).contains(&width) {
            return Ok(());
        }
        Err(DemoError::InvalidTarget {
            target: target.to_string(),
            reason: format!("width must be in 1..={}, got {width}", Self::MAX_WIDTH),
        })
    }

    /// Parse a target that must be exactly `width` bits long.
    pub fn parse(s: &str, width: usize) -> DemoResult<Self> {
        let invalid = |reason: String| DemoError::InvalidTarget {
            target: s.to_string(),
            reason,
        };

        Self::check_width(s, width)?;
        if s.chars().count() != width {
            return Err(invalid(format!("expected {width} bits")));
        }
        if let Some(c) = s.chars().find(|c| !matches!(c, '0' | '1')) {
            return Err(invalid(format!("'{c}' is not a binary digit")));
        }

        Ok(Self(s.to_string()))
    }

    /// Build a target from the low `width` bits of `value`.
    pub fn from_index(value: usize, width: usize) -> DemoResult<Self> {
        Self::check_width(&value.to_string(), width)?;
        if value >> width != 0 {
            return Err(DemoError::InvalidTarget {
                target: value.to_string(),
                reason: format!("does not fit in {width} bits"),
            });
        }
        Ok(Self(format!("{value:0width$b}")))
    }

    /// The bit pattern as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of qubits needed to search for this target.
    pub fn num_qubits(&self) -> usize {
        self.0.len()
    }

    /// Value qubit `qubit` must hold in the marked state.
    pub fn qubit_is_set(&self, qubit: usize) -> bool {
        self.0.as_bytes()[self.0.len() - 1 - qubit] == b'1'
    }

    /// The target as an integer basis index.
    pub fn index(&self) -> usize {
        (0..self.num_qubits())
            .filter(|&q| self.qubit_is_set(q))
            .fold(0, |acc, q| acc | (1 << q))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Target {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Self::DEFAULT_WIDTH)
    }
}

impl TryFrom<String> for Target {
    type Error = DemoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let width = s.len();
        Self::parse(&s, width)
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.0
    }
}

/// Calculate the number of Grover rounds for `n_qubits`.
///
/// For a single marked item in a space of size N = 2^n this is
/// ⌊π/4 · √N⌋, never less than one. This rounds down where the nearest
/// integer would round up: n = 2 gives 1 (not 2) and n = 7 gives 8 (not 9).
/// Pass an explicit count to [`run`] for the other choice.
pub fn optimal_rounds(n_qubits: usize) -> usize {
    let space = 2f64.powi(n_qubits as i32);
    ((PI / 4.0 * space.sqrt()).floor() as usize).max(1)
}

/// Append the oracle that flips the phase of `target`.
pub fn mark(circuit: &mut Circuit, target: &Target) -> DemoResult<()> {
    let n = target.num_qubits();
    if circuit.num_qubits() != n {
        return Err(DemoError::QubitCountMismatch {
            circuit: circuit.num_qubits(),
            expected: n,
        });
    }

    let zeros: Vec<_> = (0..n)
        .filter(|&q| !target.qubit_is_set(q))
        .map(qubit)
        .collect();

    for &q in &zeros {
        circuit.x(q)?;
    }
    phase_flip_all_ones(circuit, n, "oracle")?;
    for &q in &zeros {
        circuit.x(q)?;
    }

    Ok(())
}

/// Append the diffusion operator 2|s⟩⟨s| − I over `n_qubits`, up to a
/// global phase of −1.
pub fn diffuse(circuit: &mut Circuit, n_qubits: usize) -> DemoResult<()> {
    if circuit.num_qubits() != n_qubits {
        return Err(DemoError::QubitCountMismatch {
            circuit: circuit.num_qubits(),
            expected: n_qubits,
        });
    }

    for q in 0..n_qubits {
        circuit.h(qubit(q))?;
    }
    for q in 0..n_qubits {
        circuit.x(qubit(q))?;
    }
    phase_flip_all_ones(circuit, n_qubits, "diffuser")?;
    for q in 0..n_qubits {
        circuit.x(qubit(q))?;
    }
    for q in 0..n_qubits {
        circuit.h(qubit(q))?;
    }

    Ok(())
}

/// −1 on |1…1⟩: H on the last qubit around an MCX controlled by the rest.
/// The MCX carries `label` so the two reflections stay apart in dumps.
fn phase_flip_all_ones(circuit: &mut Circuit, n_qubits: usize, label: &str) -> DemoResult<()> {
    let last = qubit(n_qubits - 1);
    let mcx = Gate::from(StandardGate::MCX {
        num_controls: n_qubits as u32 - 1,
    })
    .labelled(label);

    circuit.h(last)?;
    circuit.gate(mcx, (0..n_qubits).map(qubit))?;
    circuit.h(last)?;

    Ok(())
}

fn qubit(index: usize) -> QubitId {
    QubitId(index as u32)
}

/// Equal superposition over the target's qubits, ready for rounds.
fn superposition(target: &Target, name: &str) -> DemoResult<Circuit> {
    let n = target.num_qubits();
    let mut circuit = Circuit::with_size(name, n as u32, n as u32);
    for q in 0..n {
        circuit.h(qubit(q))?;
    }
    Ok(circuit)
}

/// Generate a Grover search circuit.
///
/// # Arguments
/// * `target` - The marked bit pattern
/// * `rounds` - Number of oracle + diffusion rounds (see [`optimal_rounds`])
///
/// # Returns
/// A circuit over `target.num_qubits()` qubits, measuring qubit `i` into
/// classical bit `i`.
pub fn grover_circuit(target: &Target, rounds: usize) -> DemoResult<Circuit> {
    let n = target.num_qubits();
    let mut circuit = superposition(target, "grover")?;

    for _ in 0..rounds {
        mark(&mut circuit, target)?;
        diffuse(&mut circuit, n)?;
    }

    for q in 0..n {
        circuit.measure(qubit(q), ClbitId(q as u32))?;
    }

    debug!(
        target = %target,
        rounds,
        ops = circuit.num_ops(),
        depth = circuit.depth(),
        "built grover circuit"
    );

    Ok(circuit)
}

/// A named, measurement-free prefix of a Grover circuit.
#[derive(Debug, Clone)]
pub struct GroverStep {
    /// Human-readable stage name.
    pub label: String,
    /// Gates applied up to and including this stage.
    pub circuit: Circuit,
}

/// Snapshots of the first Grover round for amplitude inspection.
///
/// Returns three prefixes: after superposition, after the oracle and after
/// diffusion.
pub fn grover_steps(target: &Target) -> DemoResult<Vec<GroverStep>> {
    let n = target.num_qubits();
    let mut circuit = superposition(target, "grover_steps")?;
    let mut steps = Vec::with_capacity(3);

    steps.push(GroverStep {
        label: "Step 1: After Superposition".into(),
        circuit: circuit.clone(),
    });

    mark(&mut circuit, target)?;
    steps.push(GroverStep {
        label: "Step 2: After Oracle".into(),
        circuit: circuit.clone(),
    });

    diffuse(&mut circuit, n)?;
    steps.push(GroverStep {
        label: "Step 3: After Diffusion".into(),
        circuit,
    });

    Ok(steps)
}

/// Build the search circuit for `target`, execute it and return the counts.
#[instrument(skip(backend, target), fields(backend = backend.name(), target = %target))]
pub async fn run<B>(backend: &B, target: &Target, rounds: usize, shots: u32) -> DemoResult<Counts>
where
    B: Backend + ?Sized,
{
    let limit = backend.capabilities().num_qubits as usize;
    if target.num_qubits() > limit {
        return Err(HalError::CircuitTooLarge(format!(
            "{}-bit target needs more than the {limit} qubits of {}",
            target.num_qubits(),
            backend.name()
        ))
        .into());
    }

    let circuit = grover_circuit(target, rounds)?;
    super::execute(backend, &circuit, shots).await
}
