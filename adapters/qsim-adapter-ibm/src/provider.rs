//! [`HardwareProvider`] implementation backed by IBM Quantum.

use async_trait::async_trait;
use qsim_hal::{
    BackendInfo, Counts, ExecutionResult, HalError, HalResult, HardwareProvider, JobId, JobStatus,
    ProviderConfig, SubmitOptions,
};
use qsim_ir::{Circuit, qasm};
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::api::{self, DEFAULT_ENDPOINT, IbmClient, JobResultResponse};
use crate::error::{IbmError, IbmResult};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "IBM_QUANTUM_TOKEN";
/// Environment variable overriding the API endpoint.
pub const ENDPOINT_ENV: &str = "IBM_QUANTUM_ENDPOINT";
/// Environment variable selecting the hub/group/project.
pub const INSTANCE_ENV: &str = "IBM_QUANTUM_INSTANCE";

/// Build a provider configuration from the process environment.
///
/// Returns `None` when no token is set, in which case only local simulators
/// are available. Meant to be called once at startup.
pub fn config_from_env() -> Option<ProviderConfig> {
    let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty())?;
    let mut config = ProviderConfig::new("ibm").with_token(token);
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        config = config.with_endpoint(endpoint);
    }
    if let Ok(instance) = std::env::var(INSTANCE_ENV) {
        config = config.with_instance(instance);
    }
    Some(config)
}

/// IBM Quantum hardware provider.
#[derive(Debug)]
pub struct IbmProvider {
    client: IbmClient,
    /// Classical register width of submitted circuits, until their results are read.
    widths: RwLock<FxHashMap<String, usize>>,
}

impl IbmProvider {
    /// Create a provider from explicit configuration.
    pub fn new(config: &ProviderConfig) -> IbmResult<Self> {
        let token = config.token.as_deref().ok_or(IbmError::MissingToken)?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        let mut client = IbmClient::new(endpoint, token)?;
        if let Some(instance) = &config.instance {
            client = client.with_instance(instance);
        }
        info!(endpoint = client.endpoint(), "IBM Quantum provider configured");

        Ok(Self {
            client,
            widths: RwLock::new(FxHashMap::default()),
        })
    }

    /// Number of submitted jobs whose results have not been collected.
    pub async fn pending_jobs(&self) -> usize {
        self.widths.read().await.len()
    }
}

#[async_trait]
impl HardwareProvider for IbmProvider {
    fn name(&self) -> &str {
        "ibm"
    }

    #[instrument(skip(self))]
    async fn list_backends(&self) -> HalResult<Vec<BackendInfo>> {
        let backends = self.client.list_backends().await?;
        debug!(count = backends.len(), "listed IBM backends");
        Ok(backends.into_iter().map(to_hal_backend).collect())
    }

    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    async fn submit(
        &self,
        backend: &str,
        circuit: &Circuit,
        options: &SubmitOptions,
    ) -> HalResult<JobId> {
        let info = self.client.get_backend(backend).await?;
        if circuit.num_qubits() > info.num_qubits {
            return Err(IbmError::TooManyQubits {
                required: circuit.num_qubits(),
                available: info.num_qubits,
            }
            .into());
        }
        if !info.status.operational {
            return Err(HalError::BackendUnavailable(format!(
                "{backend}: {}",
                info.status.label()
            )));
        }

        let response = self
            .client
            .submit_sampler_job(
                backend,
                qasm::emit(circuit),
                options.shots,
                options.optimization_level,
            )
            .await
            .map_err(|e| HalError::SubmissionFailed(e.to_string()))?;

        info!(job = %response.id, backend, "submitted job");
        self.widths
            .write()
            .await
            .insert(response.id.clone(), circuit.num_qubits());
        Ok(JobId::new(response.id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let status = self.client.get_job_status(&job_id.0).await?;
        Ok(to_job_status(&status))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let status = self.client.get_job_status(&job_id.0).await?;
        if !status.is_completed() {
            let job_status = to_job_status(&status);
            if job_status.is_terminal() {
                self.widths.write().await.remove(&job_id.0);
            }
            return Err(match job_status {
                JobStatus::Failed(msg) => IbmError::JobFailed(msg),
                JobStatus::Cancelled => IbmError::JobCancelled(job_id.0.clone()),
                _ => IbmError::JobNotCompleted(job_id.0.clone()),
            }
            .into());
        }

        let results = self.client.get_job_results(&job_id.0).await?;
        let width = self.widths.write().await.remove(&job_id.0);
        let counts = results_to_counts(&results, width);
        let shots = u32::try_from(counts.total_shots()).unwrap_or(u32::MAX);
        Ok(ExecutionResult::new(counts, shots))
    }
}

fn to_hal_backend(info: api::BackendInfo) -> BackendInfo {
    let num_qubits = u32::try_from(info.num_qubits).unwrap_or(u32::MAX);
    let described = if info.simulator {
        BackendInfo::simulator(&info.name, format!("IBM Quantum {}", info.name), num_qubits)
    } else {
        BackendInfo::quantum(&info.name, num_qubits)
            .with_description(format!("IBM Quantum {}", info.name))
    };
    described.with_status(info.status.label())
}

fn to_job_status(status: &api::JobStatusResponse) -> JobStatus {
    match status.status.to_uppercase().as_str() {
        "QUEUED" | "INITIALIZING" => JobStatus::Queued,
        "VALIDATING" | "RUNNING" => JobStatus::Running,
        "COMPLETED" | "DONE" => JobStatus::Completed,
        "FAILED" | "ERROR" => JobStatus::Failed(
            status
                .error_message()
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
        "CANCELLED" => JobStatus::Cancelled,
        // Unrecognised states are still in flight.
        _ => JobStatus::Running,
    }
}

/// Convert sampler output to counts.
///
/// `width` is the circuit's classical register size when known; otherwise it
/// is inferred from the largest observed outcome.
fn results_to_counts(results: &JobResultResponse, width: Option<usize>) -> Counts {
    let mut counts = Counts::new();
    let Some(result) = results.results.first() else {
        return counts;
    };

    if let Some(data) = &result.data {
        for register in data.values() {
            let bits = width.unwrap_or_else(|| infer_bit_width(&register.samples));
            for sample in &register.samples {
                counts.insert(hex_to_binary(sample, bits), 1);
            }
        }
    } else if let Some(raw) = &result.counts {
        let keys: Vec<String> = raw.keys().cloned().collect();
        let bits = width.unwrap_or_else(|| infer_bit_width(&keys));
        for (outcome, &count) in raw {
            counts.insert(hex_to_binary(outcome, bits), count);
        }
    } else if let Some(dist) = result.quasi_dists.as_ref().and_then(|d| d.first()) {
        let shots = result
            .metadata
            .as_ref()
            .and_then(|m| m.get("shots"))
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(1024) as f64;
        let keys: Vec<String> = dist.keys().cloned().collect();
        let bits = width.unwrap_or_else(|| infer_bit_width(&keys));
        for (outcome, &prob) in dist {
            let count = (prob * shots).max(0.0).round() as u64;
            if count > 0 {
                counts.insert(hex_to_binary(outcome, bits), count);
            }
        }
    }

    counts
}

/// Bits needed for the largest hex outcome, at least 1.
fn infer_bit_width(samples: &[String]) -> usize {
    let max_val = samples
        .iter()
        .filter_map(|s| u64::from_str_radix(s.strip_prefix("0x").unwrap_or(s), 16).ok())
        .max()
        .unwrap_or(0);

    if max_val == 0 {
        1
    } else {
        64 - max_val.leading_zeros() as usize
    }
}

/// Hex outcome to a zero-padded binary string; non-hex input is returned as-is.
fn hex_to_binary(hex: &str, width: usize) -> String {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    match u64::from_str_radix(digits, 16) {
        Ok(value) => format!("{value:0width$b}"),
        Err(_) => digits.to_string(),
    }
}
