//! Local statevector simulator for qhunt.
//!
//! Circuits are evolved exactly once as a full statevector; measurement
//! shots are then sampled from the resulting distribution. That keeps a
//! 1024-shot run of a 4-qubit Grover search effectively instant.
//!
//! # Features
//!
//! - **Exact amplitudes**: [`Statevector::from_circuit`] exposes the
//!   pre-measurement state for inspection.
//! - **All `qhunt-ir` gates**, including multi-controlled X.
//! - **Reproducible sampling**: set a `seed` in the [`BackendConfig`] or use
//!   [`SimulatorBackend::with_seed`].
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 4 | 256 B |
//! | 10 | ~16 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```
//! use qhunt_adapter_sim::SimulatorBackend;
//! use qhunt_hal::Backend;
//! use qhunt_ir::Circuit;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let backend = SimulatorBackend::with_seed(1);
//! let job_id = backend.submit(&Circuit::bell().unwrap(), 1000).await.unwrap();
//! let result = backend.wait(&job_id).await.unwrap();
//!
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! # });
//! ```
//!
//! [`BackendConfig`]: qhunt_hal::BackendConfig

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
