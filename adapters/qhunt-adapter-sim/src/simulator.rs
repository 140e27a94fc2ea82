//! The in-process [`Backend`].

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use qhunt_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qhunt_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Outcomes rarer than this are never drawn.
const MIN_PROBABILITY: f64 = 1e-15;

struct Entry {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Statevector simulator that runs each job to completion inside `submit`.
///
/// The state is computed once per job and shots are drawn from its
/// measurement distribution, so circuits may only measure at the end.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Mutex<FxHashMap<JobId, Entry>>,
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits, None)
    }

    /// A simulator whose counts are reproducible across runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, Some(seed))
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let capabilities = Capabilities {
            name: config.name.clone(),
            ..Capabilities::simulator(max_qubits)
        };
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self {
            config,
            capabilities,
            jobs: Mutex::new(FxHashMap::default()),
            rng: Mutex::new(rng),
        }
    }

    fn jobs(&self) -> MutexGuard<'_, FxHashMap<JobId, Entry>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn problems(&self, circuit: &Circuit) -> Vec<String> {
        let mut problems = Vec::new();
        let width = circuit.num_qubits();
        let limit = self.capabilities.num_qubits as usize;

        if width > limit {
            problems.push(format!("{width} qubits exceed the simulator limit of {limit}"));
        }

        let mut measured = vec![false; width];
        for inst in circuit.instructions() {
            if let Some(q) = inst.qubits.iter().find(|q| q.index() >= width) {
                problems.push(format!("{} addresses missing qubit {q}", inst.name()));
                continue;
            }
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if !self.capabilities.gate_set.contains(gate.name()) {
                        problems.push(format!("gate {} is not supported", gate.name()));
                    }
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                        problems.push(format!("{} acts on {q} after it was measured", gate.name()));
                    }
                }
                InstructionKind::Measure => {
                    inst.qubits.iter().for_each(|q| measured[q.index()] = true);
                }
                InstructionKind::Barrier => {}
            }
        }

        problems
    }

    #[instrument(skip_all, fields(qubits = circuit.num_qubits(), shots = shots))]
    fn simulate(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let started = Instant::now();

        let state = Statevector::from_circuit(circuit);
        let outcomes = distribution(circuit, &state);
        debug!(outcomes = outcomes.len(), "state ready");

        let counts = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            sample(&outcomes, shots, &mut *rng)?
        };

        let elapsed = started.elapsed();
        debug!(?elapsed, "sampling done");
        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

/// Probability of each classical-bit string, highest bit leftmost.
///
/// Without any measurement every qubit `i` is read into bit `i`.
fn distribution(circuit: &Circuit, state: &Statevector) -> Vec<(String, f64)> {
    let mut readout: Vec<(usize, usize)> = circuit
        .instructions()
        .iter()
        .filter(|inst| inst.is_measure())
        .flat_map(|inst| inst.qubits.iter().zip(&inst.clbits))
        .map(|(q, c)| (q.index(), c.index()))
        .collect();

    let width = if readout.is_empty() {
        readout = (0..circuit.num_qubits()).map(|q| (q, q)).collect();
        circuit.num_qubits()
    } else {
        circuit.num_clbits()
    };

    let mut merged: FxHashMap<String, f64> = FxHashMap::default();
    for (index, p) in state.probabilities().into_iter().enumerate() {
        if p < MIN_PROBABILITY {
            continue;
        }
        let mut bits = vec!['0'; width];
        for &(qubit, clbit) in &readout {
            if index >> qubit & 1 == 1 {
                bits[width - 1 - clbit] = '1';
            }
        }
        *merged.entry(bits.into_iter().collect()).or_default() += p;
    }

    let mut outcomes: Vec<_> = merged.into_iter().collect();
    outcomes.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    outcomes
}

fn sample<R: Rng + ?Sized>(outcomes: &[(String, f64)], shots: u32, rng: &mut R) -> HalResult<Counts> {
    let index = WeightedIndex::new(outcomes.iter().map(|(_, p)| *p))
        .map_err(|e| HalError::JobFailed(format!("cannot sample state: {e}")))?;

    let mut counts = Counts::new();
    for _ in 0..shots {
        counts.insert(outcomes[index.sample(&mut *rng)].0.as_str(), 1);
    }
    Ok(counts)
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let problems = self.problems(circuit);
        Ok(if problems.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons: problems }
        })
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let limit = self.capabilities.num_qubits as usize;
        if circuit.num_qubits() > limit {
            return Err(HalError::CircuitTooLarge(format!(
                "{} qubits exceed the simulator limit of {limit}",
                circuit.num_qubits()
            )));
        }
        let max_shots = self.capabilities.max_shots;
        if !(1..=max_shots).contains(&shots) {
            return Err(HalError::InvalidShots(format!(
                "shots must be in 1..={max_shots}, got {shots}"
            )));
        }
        self.validate(circuit).await?.into_result()?;

        let id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(id.clone(), self.name(), shots);
        job.transition(JobStatus::Running);
        self.jobs().insert(id.clone(), Entry { job, result: None });
        debug!(job = %id, "job running");

        let outcome = self.simulate(circuit, shots);

        let mut jobs = self.jobs();
        if let Some(entry) = jobs.get_mut(&id) {
            match outcome {
                Ok(result) => {
                    entry.result = Some(result);
                    entry.job.transition(JobStatus::Completed);
                }
                Err(e) => {
                    warn!(job = %id, error = %e, "simulation failed");
                    entry.job.transition(JobStatus::Failed(e.to_string()));
                }
            }
        }

        Ok(id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs()
            .get(job_id)
            .map(|entry| entry.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.to_string()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs();
        let entry = jobs
            .get(job_id)
            .ok_or_else(|| HalError::JobNotFound(job_id.to_string()))?;

        match (&entry.job.status, &entry.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(reason), _) => Err(HalError::JobFailed(reason.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::JobFailed(format!(
                "job {job_id} has no result yet (status: {status})"
            ))),
        }
    }

    /// Jobs finish inside `submit`, so cancelling only marks unfinished ones.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs();
        let entry = jobs
            .get_mut(job_id)
            .ok_or_else(|| HalError::JobNotFound(job_id.to_string()))?;
        entry.job.transition(JobStatus::Cancelled);
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    /// Reads the optional `max_qubits` and `seed` settings.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .get_u64("max_qubits")?
            .map(|v| {
                u32::try_from(v).map_err(|_| {
                    HalError::Configuration(format!("'max_qubits' out of range: {v}"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_QUBITS);
        let seed = config.get_u64("seed")?;

        Ok(Self::build(config, max_qubits, seed))
    }
}
