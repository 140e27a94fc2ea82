//! The execution seam between circuit builders and whatever runs circuits.
//!
//! ```text
//!   validate() ──→ submit() ──→ status() ──→ result()
//!                      └──────── wait() ────────┘
//! ```
//!
//! | Method | Kind | Required |
//! |--------|------|----------|
//! | `name()`, `capabilities()` | sync | yes |
//! | `availability()`, `validate()` | async | yes |
//! | `submit()`, `status()`, `result()`, `cancel()` | async | yes |
//! | `wait()` | async | provided |

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qhunt_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// First delay between status polls in [`Backend::wait`].
const FIRST_POLL: Duration = Duration::from_millis(10);
/// Upper bound for the poll delay.
const MAX_POLL: Duration = Duration::from_millis(500);
/// How long [`Backend::wait`] keeps polling.
const WAIT_LIMIT: Duration = Duration::from_secs(300);

/// Name plus free-form settings for building a backend.
///
/// Settings sit next to `name` in JSON:
///
/// ```
/// # use qhunt_hal::BackendConfig;
/// let config = BackendConfig::from_json(r#"{"name": "simulator", "seed": 7}"#).unwrap();
/// assert_eq!(config.get_u64("seed").unwrap(), Some(7));
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn from_json(json: &str) -> HalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an optional unsigned integer setting.
    ///
    /// A present value that is not a non-negative integer is an error.
    pub fn get_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackendConfig({}", self.name)?;
        for key in self.extra.keys() {
            write!(f, ", {key}")?;
        }
        f.write_str(")")
    }
}

/// Something that executes circuits and reports measurement counts.
///
/// `capabilities()` is cached at construction, so it is synchronous.
/// `result()` only succeeds for a `Completed` job.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Check a circuit without submitting it.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Queue `circuit` for `shots` executions.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll `status()` until the job finishes, then fetch its result.
    ///
    /// The poll delay doubles from 10 ms up to 500 ms; after five minutes
    /// the wait gives up with [`HalError::Timeout`].
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut delay = FIRST_POLL;
        let mut waited = Duration::ZERO;

        loop {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(reason) => return Err(HalError::JobFailed(reason)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                status @ (JobStatus::Queued | JobStatus::Running) => {
                    if waited >= WAIT_LIMIT {
                        return Err(HalError::Timeout(job_id.to_string()));
                    }
                    debug!(job = %job_id, %status, ?delay, "waiting for job");
                    tokio::time::sleep(delay).await;
                    waited += delay;
                    delay = (delay * 2).min(MAX_POLL);
                }
            }
        }
    }
}

/// Whether a backend is currently taking jobs.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    pub is_available: bool,
    /// Why the backend is unavailable, if it says.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            status_message: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            status_message: Some(reason.into()),
        }
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone)]
pub enum ValidationResult {
    Valid,
    Invalid { reasons: Vec<String> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Turn the reasons of an invalid circuit into one `InvalidCircuit` error.
    pub fn into_result(self) -> HalResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { reasons } => {
                Err(HalError::InvalidCircuit(reasons.join("; ")))
            }
        }
    }
}

/// Backends that can be built from a [`BackendConfig`].
pub trait BackendFactory: Backend + Sized {
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::result::Counts;

    /// Finishes a job after a fixed number of status polls.
    struct SlowBackend {
        caps: Capabilities,
        polls_left: Mutex<u32>,
        outcome: JobStatus,
    }

    impl SlowBackend {
        fn new(polls: u32, outcome: JobStatus) -> Self {
            Self {
                caps: Capabilities::simulator(2),
                polls_left: Mutex::new(polls),
                outcome,
            }
        }
    }

    #[async_trait]
    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn availability(&self) -> HalResult<BackendAvailability> {
            Ok(BackendAvailability::always_available())
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }

        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::new("slow-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let mut left = self.polls_left.lock().unwrap();
            if *left == 0 {
                return Ok(self.outcome.clone());
            }
            *left -= 1;
            Ok(JobStatus::Running)
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            Ok(ExecutionResult::new(Counts::from_pairs([("00", 4)]), 4))
        }

        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_done() {
        let backend = SlowBackend::new(5, JobStatus::Completed);
        let result = backend.wait(&JobId::new("slow-1")).await.unwrap();
        assert_eq!(result.counts.get("00"), 4);
        assert_eq!(*backend.polls_left.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_surfaces_failure() {
        let backend = SlowBackend::new(1, JobStatus::Failed("decoherence".into()));
        assert!(matches!(
            backend.wait(&JobId::new("slow-1")).await,
            Err(HalError::JobFailed(reason)) if reason == "decoherence"
        ));

        let backend = SlowBackend::new(0, JobStatus::Cancelled);
        assert!(matches!(
            backend.wait(&JobId::new("slow-1")).await,
            Err(HalError::JobCancelled)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let backend = SlowBackend::new(u32::MAX, JobStatus::Completed);
        assert!(matches!(
            backend.wait(&JobId::new("slow-1")).await,
            Err(HalError::Timeout(_))
        ));
    }

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("simulator")
            .with_extra("max_qubits", serde_json::json!(12))
            .with_extra("seed", serde_json::Value::Null);

        assert_eq!(config.get_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.get_u64("seed").unwrap(), None);
        assert_eq!(config.get_u64("missing").unwrap(), None);
        assert_eq!(format!("{config:?}"), "BackendConfig(simulator, max_qubits, seed)");
    }

    #[test]
    fn test_backend_config_rejects_malformed_value() {
        let config = BackendConfig::new("simulator").with_extra("seed", serde_json::json!(-3));
        assert!(matches!(
            config.get_u64("seed"),
            Err(HalError::Configuration(_))
        ));
        assert!(matches!(
            BackendConfig::from_json("{\"seed\": 1}"),
            Err(HalError::Json(_))
        ));
    }

    #[test]
    fn test_validation_result() {
        assert!(ValidationResult::Valid.into_result().is_ok());

        let invalid = ValidationResult::Invalid {
            reasons: vec!["too wide".into(), "bad gate".into()],
        };
        assert!(!invalid.is_valid());
        match invalid.into_result() {
            Err(HalError::InvalidCircuit(msg)) => assert_eq!(msg, "too wide; bad gate"),
            other => panic!("expected InvalidCircuit, got {other:?}"),
        }
    }

    #[test]
    fn test_unavailable_carries_reason() {
        let down = BackendAvailability::unavailable("maintenance");
        assert!(!down.is_available);
        assert_eq!(down.status_message.as_deref(), Some("maintenance"));
    }
}
