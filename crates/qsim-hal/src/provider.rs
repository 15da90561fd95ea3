//! The hardware-provider trait and its configuration.
//!
//! ```text
//!   list_backends() ──→ submit() ──→ status() ──→ result()
//!                                       ↑   │
//!                                       └───┘ wait() polls
//! ```
//!
//! `wait()` is provided: it polls `status()` every 500ms and gives up after
//! 600 polls (5 minutes).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use qsim_ir::Circuit;
use serde::{Deserialize, Serialize};

use crate::backend::BackendInfo;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Default shot count for hardware submissions.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Highest transpiler optimization level a provider accepts.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 3;

/// Connection settings for a provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name.
    pub name: String,
    /// API endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Account instance (hub/group/project or CRN).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProviderConfig {
    /// Create a new provider configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            instance: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the account instance.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("instance", &self.instance)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Per-submission options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitOptions {
    /// Number of shots.
    pub shots: u32,
    /// Transpiler optimization level, 0..=3.
    pub optimization_level: u8,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            optimization_level: 1,
        }
    }
}

impl SubmitOptions {
    /// Set the shot count.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the optimization level.
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }
}

/// A remote quantum-hardware provider.
///
/// Errors are surfaced to the caller as-is.
#[async_trait]
pub trait HardwareProvider: Send + Sync {
    /// Provider name, used in logs.
    fn name(&self) -> &str;

    /// List the backends this provider exposes.
    async fn list_backends(&self) -> HalResult<Vec<BackendInfo>>;

    /// Submit a circuit to a named backend.
    async fn submit(
        &self,
        backend: &str,
        circuit: &Circuit,
        options: &SubmitOptions,
    ) -> HalResult<JobId>;

    /// Current status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Results of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Whether `backend` is among the provider's backends.
    async fn has_backend(&self, backend: &str) -> HalResult<bool> {
        Ok(self
            .list_backends()
            .await?
            .iter()
            .any(|info| info.name == backend))
    }

    /// Wait for a job to complete and return its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        use tokio::time::sleep;

        let poll_interval = Duration::from_millis(500);
        let max_polls = 600;

        for _ in 0..max_polls {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tracing::debug!(provider = self.name(), job = %job_id, "job pending");
                    sleep(poll_interval).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::result::Counts;

    /// Reports `Running` for a fixed number of polls, then `Completed`.
    struct SlowProvider {
        polls_left: AtomicU32,
    }

    #[async_trait]
    impl HardwareProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn list_backends(&self) -> HalResult<Vec<BackendInfo>> {
            Ok(vec![BackendInfo::quantum("slow_device", 5)])
        }

        async fn submit(
            &self,
            _backend: &str,
            _circuit: &Circuit,
            _options: &SubmitOptions,
        ) -> HalResult<JobId> {
            Ok(JobId::new("job-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let left = self.polls_left.load(Ordering::SeqCst);
            if left == 0 {
                Ok(JobStatus::Completed)
            } else {
                self.polls_left.store(left - 1, Ordering::SeqCst);
                Ok(JobStatus::Running)
            }
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            let mut counts = Counts::new();
            counts.insert("00", 512);
            counts.insert("11", 512);
            Ok(ExecutionResult::new(counts, 1024))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_complete() {
        let provider = SlowProvider {
            polls_left: AtomicU32::new(3),
        };
        let result = provider.wait(&JobId::new("job-1")).await.unwrap();
        assert_eq!(result.counts.total_shots(), 1024);
    }

    #[tokio::test]
    async fn test_has_backend() {
        let provider = SlowProvider {
            polls_left: AtomicU32::new(0),
        };
        assert!(provider.has_backend("slow_device").await.unwrap());
        assert!(!provider.has_backend("ibm_torino").await.unwrap());
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = ProviderConfig::new("ibm").with_token("secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_submit_options_defaults() {
        let opts: SubmitOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.shots, DEFAULT_SHOTS);
        assert_eq!(opts.optimization_level, 1);
    }
}
