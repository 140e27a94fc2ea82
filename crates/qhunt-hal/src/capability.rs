//! What a backend can run.

use serde::{Deserialize, Serialize};

const ONE_QUBIT: [&str; 11] = ["id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "p", "rz"];
const TWO_QUBIT: [&str; 4] = ["cx", "cz", "cp", "swap"];
const MANY_QUBIT: [&str; 2] = ["ccx", "mcx"];

/// Limits a backend advertises up front. `validate()` checks circuits
/// against these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub name: String,
    pub num_qubits: u32,
    pub gate_set: GateSet,
    pub max_shots: u32,
    pub is_simulator: bool,
    /// Free-form flags such as `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// A local statevector simulator: every gate, up to 100 000 shots.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Accepted gate mnemonics, grouped by operand count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateSet {
    pub single_qubit: Vec<String>,
    pub two_qubit: Vec<String>,
    pub multi_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate `qhunt-ir` can express.
    pub fn universal() -> Self {
        let owned = |names: &[&str]| -> Vec<String> { names.iter().map(|n| n.to_string()).collect() };
        Self {
            single_qubit: owned(&ONE_QUBIT),
            two_qubit: owned(&TWO_QUBIT),
            multi_qubit: owned(&MANY_QUBIT),
        }
    }

    pub fn contains(&self, gate: &str) -> bool {
        [&self.single_qubit, &self.two_qubit, &self.multi_qubit]
            .into_iter()
            .flatten()
            .any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.is_simulator);
        assert!(caps.has_feature("statevector"));
        assert!(!caps.has_feature("mid_circuit_measurement"));
    }

    #[test]
    fn test_gate_set_contains() {
        let gates = GateSet::universal();
        assert!(gates.contains("h"));
        assert!(gates.contains("cp"));
        assert!(gates.contains("mcx"));
        assert!(!gates.contains("iswap"));
        assert!(!GateSet::default().contains("h"));
    }
}
