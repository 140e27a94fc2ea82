//! The seam between circuit builders and whatever executes circuits.
//!
//! Builders produce a `qhunt_ir::Circuit`; a [`Backend`] turns it into a job
//! and eventually into [`Counts`]. Callers that only hold a `&dyn Backend`
//! follow the same path:
//!
//! ```text
//! availability() ─▶ submit(circuit, shots) ─▶ wait(job) ─▶ ExecutionResult
//! ```
//!
//! Backends describe their limits through [`Capabilities`] and can be built
//! from a JSON [`BackendConfig`] via [`BackendFactory`].

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
