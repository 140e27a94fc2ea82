//! Quantum circuit generators for demos.

pub mod grover;
pub mod qpe;

pub use grover::{Target, grover_circuit, optimal_rounds};
pub use qpe::{Phase, qpe_circuit};

use qhunt_hal::{Backend, Counts, HalError};
use qhunt_ir::Circuit;

use crate::error::DemoResult;

/// Submit `circuit` to an available backend and wait for its counts.
pub(crate) async fn execute<B>(backend: &B, circuit: &Circuit, shots: u32) -> DemoResult<Counts>
where
    B: Backend + ?Sized,
{
    let availability = backend.availability().await?;
    if !availability.is_available {
        let reason = availability
            .status_message
            .unwrap_or_else(|| backend.name().to_string());
        return Err(HalError::BackendUnavailable(reason).into());
    }

    let job_id = backend.submit(circuit, shots).await?;
    let result = backend.wait(&job_id).await?;
    Ok(result.counts)
}
