//! Quantum Phase Estimation circuit generator.
//!
//! Estimates the eigenphase φ of U = P(2πφ) acting on |1⟩. Counting qubit
//! `i` applies U^(2^i), so after the inverse QFT the counting register holds
//! the binary fraction of φ, read with the highest classical bit first.

use std::f64::consts::PI;

use tracing::{debug, instrument};

use qhunt_hal::{Backend, Counts};
use qhunt_ir::{Circuit, ClbitId, QubitId};

use crate::error::{DemoError, DemoResult};

/// Counting register width used by the demo.
pub const DEFAULT_COUNTING_QUBITS: usize = 3;

/// An eigenphase in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase(f64);

impl Phase {
    /// Validate `phi`.
    pub fn new(phi: f64) -> DemoResult<Self> {
        if phi.is_finite() && (0.0..1.0).contains(&phi) {
            Ok(Self(phi))
        } else {
            Err(DemoError::InvalidPhase(phi))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Append the inverse quantum Fourier transform over `qubits`.
pub fn inverse_qft(circuit: &mut Circuit, qubits: &[QubitId]) -> DemoResult<()> {
    let n = qubits.len();

    for j in 0..n / 2 {
        circuit.swap(qubits[j], qubits[n - 1 - j])?;
    }
    for j in 0..n {
        for m in 0..j {
            let angle = -PI / 2f64.powi((j - m) as i32);
            circuit.cp(angle, qubits[m], qubits[j])?;
        }
        circuit.h(qubits[j])?;
    }

    Ok(())
}

/// Generate a phase estimation circuit.
///
/// Qubits `0..counting_qubits` form the counting register; qubit
/// `counting_qubits` holds the eigenstate. Only the counting register is
/// measured.
pub fn qpe_circuit(phase: Phase, counting_qubits: usize) -> DemoResult<Circuit> {
    if counting_qubits == 0 {
        return Err(DemoError::NoCountingQubits);
    }

    let c = counting_qubits as u32;
    let mut circuit = Circuit::with_size("qpe", c + 1, c);
    let counting: Vec<_> = (0..c).map(QubitId).collect();
    let eigen = QubitId(c);

    for &q in &counting {
        circuit.h(q)?;
    }
    circuit.x(eigen)?;

    for (i, &q) in counting.iter().enumerate() {
        let angle = 2.0 * PI * phase.value() * 2f64.powi(i as i32);
        circuit.cp(angle, q, eigen)?;
    }

    inverse_qft(&mut circuit, &counting)?;

    for (i, &q) in counting.iter().enumerate() {
        circuit.measure(q, ClbitId(i as u32))?;
    }

    debug!(
        phi = phase.value(),
        counting_qubits,
        ops = circuit.num_ops(),
        "built qpe circuit"
    );

    Ok(circuit)
}

/// Read a measured counting register as a phase `k / 2^c`.
pub fn decode_phase(bits: &str) -> DemoResult<f64> {
    if bits.is_empty() || bits.len() >= 64 {
        return Err(DemoError::InvalidBitstring(bits.to_string()));
    }
    let k = u64::from_str_radix(bits, 2)
        .map_err(|_| DemoError::InvalidBitstring(bits.to_string()))?;
    Ok(k as f64 / 2f64.powi(bits.len() as i32))
}

/// The phase decoded from the most frequent outcome.
pub fn estimate(counts: &Counts) -> DemoResult<Option<f64>> {
    counts
        .most_frequent()
        .map(|(bits, _)| decode_phase(bits))
        .transpose()
}

/// Build the phase estimation circuit, execute it and return the counts.
#[instrument(skip(backend, phase), fields(backend = backend.name(), phi = phase.value()))]
pub async fn run<B>(
    backend: &B,
    phase: Phase,
    counting_qubits: usize,
    shots: u32,
) -> DemoResult<Counts>
where
    B: Backend + ?Sized,
{
    let circuit = qpe_circuit(phase, counting_qubits)?;
    super::execute(backend, &circuit, shots).await
}
