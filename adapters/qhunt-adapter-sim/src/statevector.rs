//! Dense statevector kernels.
//!
//! Bit `q` of a basis index is the value of qubit `q`: qubit 0 is the least
//! significant bit.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

use num_complex::Complex64;

use qhunt_ir::{Circuit, Instruction, InstructionKind, StandardGate};

const I: Complex64 = Complex64::new(0.0, 1.0);

/// The `2^n` amplitudes of an `n`-qubit pure state.
#[derive(Debug, Clone)]
pub struct Statevector {
    num_qubits: usize,
    amps: Vec<Complex64>,
}

impl Statevector {
    /// `|0…0⟩` on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        let mut amps = vec![Complex64::default(); 1 << num_qubits];
        amps[0] = Complex64::new(1.0, 0.0);
        Self { num_qubits, amps }
    }

    /// The state reached by running every gate of `circuit` on `|0…0⟩`.
    ///
    /// Measurements are skipped, which is exact for circuits that only
    /// measure at the end.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        circuit
            .instructions()
            .iter()
            .fold(Self::new(circuit.num_qubits()), |mut state, inst| {
                state.apply(inst);
                state
            })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amps
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply one instruction. Measurements and barriers are no-ops.
    pub fn apply(&mut self, instruction: &Instruction) {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return;
        };
        let q: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();

        match gate.kind {
            StandardGate::I => {}
            StandardGate::X => self.mcx(&[], q[0]),
            StandardGate::Y => self.pairs(q[0], |a, b| (-I * b, I * a)),
            StandardGate::Z => self.phase(&[q[0]], PI),
            StandardGate::H => self.pairs(q[0], |a, b| {
                ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
            }),
            StandardGate::S => self.phase(&[q[0]], FRAC_PI_2),
            StandardGate::Sdg => self.phase(&[q[0]], -FRAC_PI_2),
            StandardGate::T => self.phase(&[q[0]], FRAC_PI_4),
            StandardGate::Tdg => self.phase(&[q[0]], -FRAC_PI_4),
            StandardGate::P(theta) => self.phase(&[q[0]], theta),
            StandardGate::Rz(theta) => {
                let (lo, hi) = (
                    Complex64::from_polar(1.0, -theta / 2.0),
                    Complex64::from_polar(1.0, theta / 2.0),
                );
                self.pairs(q[0], |a, b| (a * lo, b * hi));
            }
            StandardGate::CX => self.mcx(&q[..1], q[1]),
            StandardGate::CZ => self.phase(&q, PI),
            StandardGate::CP(theta) => self.phase(&q, theta),
            StandardGate::Swap => self.swap(q[0], q[1]),
            StandardGate::CCX | StandardGate::MCX { .. } => {
                if let Some((&target, controls)) = q.split_last() {
                    self.mcx(controls, target);
                }
            }
        }
    }

    /// Run `f` on every `(|…0…⟩, |…1…⟩)` amplitude pair of `qubit`.
    fn pairs(&mut self, qubit: usize, f: impl Fn(Complex64, Complex64) -> (Complex64, Complex64)) {
        let bit = 1 << qubit;
        for lo in (0..self.amps.len()).filter(|i| i & bit == 0) {
            let (a, b) = f(self.amps[lo], self.amps[lo | bit]);
            self.amps[lo] = a;
            self.amps[lo | bit] = b;
        }
    }

    /// Multiply by `e^{iθ}` where every qubit in `qubits` is 1.
    fn phase(&mut self, qubits: &[usize], theta: f64) {
        let mask = bit_mask(qubits);
        let factor = Complex64::from_polar(1.0, theta);
        self.amps
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| i & mask == mask)
            .for_each(|(_, amp)| *amp *= factor);
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (bit_a, bit_b) = (1 << a, 1 << b);
        for i in 0..self.amps.len() {
            if i & bit_a != 0 && i & bit_b == 0 {
                self.amps.swap(i, i ^ bit_a ^ bit_b);
            }
        }
    }

    /// Flip `target` wherever all `controls` are 1.
    fn mcx(&mut self, controls: &[usize], target: usize) {
        let mask = bit_mask(controls);
        let bit = 1 << target;
        for i in 0..self.amps.len() {
            if i & mask == mask && i & bit == 0 {
                self.amps.swap(i, i | bit);
            }
        }
    }
}

fn bit_mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |mask, &q| mask | 1 << q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qhunt_ir::QubitId;

    const EPS: f64 = 1e-10;

    fn close(a: Complex64, re: f64, im: f64) -> bool {
        (a - Complex64::new(re, im)).norm() < EPS
    }

    fn run(n: u32, build: impl FnOnce(&mut Circuit)) -> Statevector {
        let mut circuit = Circuit::with_size("t", n, 0);
        build(&mut circuit);
        Statevector::from_circuit(&circuit)
    }

    #[test]
    fn test_starts_in_all_zeros() {
        let state = Statevector::new(3);
        assert_eq!(state.amplitudes().len(), 8);
        assert!(close(state.amplitudes()[0], 1.0, 0.0));
        assert!(state.amplitudes()[1..].iter().all(|a| a.norm() < EPS));
    }

    #[test]
    fn test_bell_amplitudes() {
        let state = Statevector::from_circuit(&Circuit::bell().unwrap());
        let amps = state.amplitudes();
        assert!(close(amps[0b00], FRAC_1_SQRT_2, 0.0));
        assert!(close(amps[0b11], FRAC_1_SQRT_2, 0.0));
        assert!(amps[0b01].norm() < EPS && amps[0b10].norm() < EPS);
    }

    #[test]
    fn test_qubit_zero_is_low_bit() {
        let state = run(3, |c| {
            c.x(QubitId(0)).unwrap();
        });
        assert!(close(state.amplitudes()[0b001], 1.0, 0.0));
    }

    #[test]
    fn test_y_and_s_phases() {
        let state = run(1, |c| {
            c.y(QubitId(0)).unwrap();
        });
        assert!(close(state.amplitudes()[1], 0.0, 1.0));

        let state = run(1, |c| {
            c.x(QubitId(0)).unwrap().s(QubitId(0)).unwrap().s(QubitId(0)).unwrap();
        });
        assert!(close(state.amplitudes()[1], -1.0, 0.0));
    }

    #[test]
    fn test_mcx_truth_table() {
        for input in 0..16usize {
            let state = run(4, |c| {
                for q in (0..4u32).filter(|&q| input >> q & 1 == 1) {
                    c.x(QubitId(q)).unwrap();
                }
                c.mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3)).unwrap();
            });
            let expected = if input & 0b0111 == 0b0111 { input ^ 0b1000 } else { input };
            assert!(close(state.amplitudes()[expected], 1.0, 0.0), "input {input:04b}");
        }
    }

    #[test]
    fn test_mcx_with_no_controls_flips_target() {
        let state = run(1, |c| {
            c.mcx(&[], QubitId(0)).unwrap();
        });
        assert!(close(state.amplitudes()[1], 1.0, 0.0));
    }

    #[test]
    fn test_h_mcx_h_flips_sign_of_all_ones() {
        let state = run(3, |c| {
            for q in 0..3 {
                c.h(QubitId(q)).unwrap();
            }
            c.h(QubitId(2)).unwrap();
            c.mcx(&[QubitId(0), QubitId(1)], QubitId(2)).unwrap();
            c.h(QubitId(2)).unwrap();
        });
        let amp = 8f64.sqrt().recip();
        for (i, &a) in state.amplitudes().iter().enumerate() {
            let sign = if i == 0b111 { -1.0 } else { 1.0 };
            assert!(close(a, sign * amp, 0.0), "index {i}");
        }
    }

    #[test]
    fn test_cp_only_touches_both_set() {
        let state = run(2, |c| {
            c.h(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
            c.cp(FRAC_PI_2, QubitId(0), QubitId(1)).unwrap();
        });
        assert!(close(state.amplitudes()[0b10], FRAC_1_SQRT_2, 0.0));
        assert!(close(state.amplitudes()[0b11], 0.0, FRAC_1_SQRT_2));
    }

    #[test]
    fn test_swap_moves_excitation() {
        let state = run(3, |c| {
            c.x(QubitId(0)).unwrap().swap(QubitId(0), QubitId(2)).unwrap();
        });
        assert!(close(state.amplitudes()[0b100], 1.0, 0.0));
    }

    #[test]
    fn test_ghz_probabilities() {
        let probs = Statevector::from_circuit(&Circuit::ghz(4).unwrap()).probabilities();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert!((probs[0] - 0.5).abs() < EPS);
        assert!((probs[0b1111] - 0.5).abs() < EPS);
    }
}
