//! Property tests for circuit construction.

use proptest::prelude::*;
use qhunt_ir::{Circuit, IrError, QubitId};

fn gate_op() -> impl Strategy<Value = (u8, u32, u32)> {
    (0u8..4, 0u32..5, 0u32..5)
}

proptest! {
    #[test]
    fn depth_never_exceeds_op_count(ops in prop::collection::vec(gate_op(), 0..40)) {
        let mut circuit = Circuit::with_size("prop", 5, 0);
        for (kind, a, b) in ops {
            let _ = match kind {
                0 => circuit.h(QubitId(a)).map(|_| ()),
                1 => circuit.x(QubitId(a)).map(|_| ()),
                2 => circuit.cp(0.5, QubitId(a), QubitId(b)).map(|_| ()),
                _ => circuit.swap(QubitId(a), QubitId(b)).map(|_| ()),
            };
        }
        prop_assert!(circuit.depth() <= circuit.num_ops());
    }

    #[test]
    fn repeated_operands_are_rejected(q in 0u32..5, swap in any::<bool>()) {
        let mut circuit = Circuit::with_size("prop", 5, 0);
        let result = if swap {
            circuit.swap(QubitId(q), QubitId(q)).map(|_| ())
        } else {
            circuit.cp(0.5, QubitId(q), QubitId(q)).map(|_| ())
        };
        let rejected = matches!(result, Err(IrError::RepeatedQubit { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn out_of_range_qubits_are_rejected(q in 5u32..64) {
        let mut circuit = Circuit::with_size("prop", 5, 0);
        let rejected = matches!(
            circuit.h(QubitId(q)),
            Err(IrError::UnknownQubit { .. })
        );
        prop_assert!(rejected);
        prop_assert_eq!(circuit.num_ops(), 0);
    }
}
