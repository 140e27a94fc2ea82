//! Wire identifiers.
//!
//! Circuits number their qubits and classical bits densely from zero, so an
//! identifier is just a position. Qubit `i` is bit `i` of a statevector
//! index; classical bit `i` is character `n - 1 - i` of a printed outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! wire_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(position: u32) -> Self {
                Self(position)
            }
        }
    };
}

wire_id!(
    /// Position of a qubit in its circuit.
    QubitId,
    "q"
);

wire_id!(
    /// Position of a classical bit in its circuit.
    ClbitId,
    "c"
);
