//! The gate set the simulator understands.

use serde::{Deserialize, Serialize};

/// A built-in gate. Angles are in radians.
///
/// Multi-qubit gates take their controls first and their target last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    /// `diag(1, e^{iθ})`.
    P(f64),
    /// `diag(e^{-iθ/2}, e^{iθ/2})`, equal to `P(θ)` up to global phase.
    Rz(f64),
    CX,
    CZ,
    /// Controlled `P(θ)`; symmetric in its two operands.
    CP(f64),
    Swap,
    CCX,
    /// X on the last operand when all `num_controls` leading operands are 1.
    MCX { num_controls: u32 },
}

impl StandardGate {
    /// Lowercase mnemonic, as used in op counts.
    pub fn name(&self) -> &'static str {
        use StandardGate::*;
        match self {
            I => "id",
            X => "x",
            Y => "y",
            Z => "z",
            H => "h",
            S => "s",
            Sdg => "sdg",
            T => "t",
            Tdg => "tdg",
            P(_) => "p",
            Rz(_) => "rz",
            CX => "cx",
            CZ => "cz",
            CP(_) => "cp",
            Swap => "swap",
            CCX => "ccx",
            MCX { .. } => "mcx",
        }
    }

    /// Number of qubit operands.
    pub fn arity(&self) -> usize {
        use StandardGate::*;
        match self {
            CX | CZ | CP(_) | Swap => 2,
            CCX => 3,
            MCX { num_controls } => *num_controls as usize + 1,
            _ => 1,
        }
    }

    /// The rotation angle, for parameterised gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::P(theta) | StandardGate::Rz(theta) | StandardGate::CP(theta) => {
                Some(*theta)
            }
            _ => None,
        }
    }
}

/// A gate as placed in a circuit, optionally tagged with the step it belongs
/// to (`"oracle"`, `"diffuser"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: StandardGate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn arity(&self) -> usize {
        self.kind.arity()
    }
}

impl From<StandardGate> for Gate {
    fn from(kind: StandardGate) -> Self {
        Gate { kind, label: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_arity() {
        assert_eq!(StandardGate::Tdg.arity(), 1);
        assert_eq!(StandardGate::Swap.arity(), 2);
        assert_eq!(StandardGate::CCX.arity(), 3);
        assert_eq!(StandardGate::MCX { num_controls: 0 }.arity(), 1);
        assert_eq!(StandardGate::MCX { num_controls: 5 }.arity(), 6);
    }

    #[test]
    fn test_angle() {
        assert_eq!(StandardGate::CP(FRAC_PI_4).angle(), Some(FRAC_PI_4));
        assert_eq!(StandardGate::Rz(-1.0).angle(), Some(-1.0));
        assert_eq!(StandardGate::S.angle(), None);
    }

    #[test]
    fn test_label_does_not_change_name() {
        let gate = Gate::from(StandardGate::MCX { num_controls: 3 }).labelled("oracle");
        assert_eq!(gate.name(), "mcx");
        assert_eq!(gate.label.as_deref(), Some("oracle"));

        let json = serde_json::to_string(&Gate::from(StandardGate::H)).unwrap();
        assert!(!json.contains("label"));
    }
}
