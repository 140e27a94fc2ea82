//! Amplitude tables for the "show amplitude evolution" view.

use num_complex::Complex64;
use serde::Serialize;

use qhunt_adapter_sim::Statevector;
use qhunt_ir::Circuit;

use crate::circuits::grover::{self, Target};
use crate::error::DemoResult;

/// One basis state and its formatted amplitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmplitudeRow {
    /// Ket label such as `|0110⟩`.
    pub label: String,
    /// Amplitude rounded to four decimals.
    pub value: String,
}

/// A labelled amplitude table.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub label: String,
    pub rows: Vec<AmplitudeRow>,
}

/// Format every amplitude of a `2^n` state vector.
///
/// The imaginary part is shown only when it is non-zero after rounding.
pub fn amplitude_table(amplitudes: &[Complex64]) -> Vec<AmplitudeRow> {
    let width = amplitudes.len().max(1).trailing_zeros() as usize;
    amplitudes
        .iter()
        .enumerate()
        .map(|(i, amp)| AmplitudeRow {
            label: format!("|{i:0width$b}⟩"),
            value: format_amplitude(*amp),
        })
        .collect()
}

/// Exact amplitudes of a measurement-free circuit.
pub fn snapshot(label: impl Into<String>, circuit: &Circuit) -> Snapshot {
    let sv = Statevector::from_circuit(circuit);
    Snapshot {
        label: label.into(),
        rows: amplitude_table(sv.amplitudes()),
    }
}

/// Amplitude tables for each stage of the first Grover round.
pub fn grover_snapshots(target: &Target) -> DemoResult<Vec<Snapshot>> {
    Ok(grover::grover_steps(target)?
        .into_iter()
        .map(|step| snapshot(step.label, &step.circuit))
        .collect())
}

fn format_amplitude(amp: Complex64) -> String {
    let re = round4(amp.re);
    let im = round4(amp.im);
    if im == 0.0 {
        format_number(re)
    } else if im < 0.0 {
        format!("{} - {}i", format_number(re), format_number(-im))
    } else {
        format!("{} + {}i", format_number(re), format_number(im))
    }
}

fn round4(x: f64) -> f64 {
    let r = (x * 1e4).round() / 1e4;
    // Collapse -0.0.
    if r == 0.0 { 0.0 } else { r }
}

fn format_number(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_rounding() {
        let amps = [
            Complex64::new(0.25, 0.0),
            Complex64::new(-0.123_456, 0.0),
            Complex64::new(0.0, 0.5),
            Complex64::new(1.0, -0.000_01),
        ];
        let table = amplitude_table(&amps);

        assert_eq!(table[0].label, "|00⟩");
        assert_eq!(table[3].label, "|11⟩");
        assert_eq!(table[0].value, "0.25");
        assert_eq!(table[1].value, "-0.1235");
        assert_eq!(table[2].value, "0.0 + 0.5i");
        assert_eq!(table[3].value, "1.0");
    }

    #[test]
    fn test_negative_imaginary_part() {
        let table = amplitude_table(&[Complex64::new(0.5, -0.5), Complex64::new(-0.0, 0.0)]);
        assert_eq!(table[0].value, "0.5 - 0.5i");
        assert_eq!(table[1].value, "0.0");
    }

    #[test]
    fn test_grover_snapshots() {
        let target: Target = "0110".parse().unwrap();
        let snapshots = grover_snapshots(&target).unwrap();

        assert_eq!(snapshots.len(), 3);
        assert!(snapshots[0].rows.iter().all(|r| r.value == "0.25"));

        let after_oracle = &snapshots[1].rows;
        assert_eq!(after_oracle[6].label, "|0110⟩");
        assert_eq!(after_oracle[6].value, "-0.25");
        assert_eq!(after_oracle.iter().filter(|r| r.value == "0.25").count(), 15);

        // Inversion about the mean, up to the diffuser's global −1 phase.
        let after_diffusion = &snapshots[2].rows;
        assert_eq!(after_diffusion[6].value, "-0.6875");
        assert_eq!(after_diffusion[0].value, "-0.1875");
    }
}
