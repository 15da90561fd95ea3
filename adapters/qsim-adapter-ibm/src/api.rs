//! IBM Quantum REST client.
//!
//! Implements the parts of the IBM Quantum runtime API the provider needs:
//! listing backends, submitting Sampler jobs, polling status and fetching
//! results. Authentication is a direct bearer token.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response, header};
use serde::{Deserialize, Serialize};

use crate::error::{IbmError, IbmResult};

/// Default IBM Quantum API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.quantum-computing.ibm.com";

/// User-Agent sent with requests.
const USER_AGENT: &str = concat!("qsim/", env!("CARGO_PKG_VERSION"));

/// IBM Quantum API client.
pub struct IbmClient {
    /// HTTP client.
    client: Client,
    /// API endpoint URL, without trailing slash.
    endpoint: String,
    /// Selected instance (hub/group/project).
    instance: Option<String>,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("instance", &self.instance)
            .finish()
    }
}

impl IbmClient {
    /// Create a client that authenticates with `token`.
    pub fn new(endpoint: impl Into<String>, token: &str) -> IbmResult<Self> {
        if token.trim().is_empty() {
            return Err(IbmError::MissingToken);
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| IbmError::InvalidToken)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            instance: None,
        })
    }

    /// Set the instance (hub/group/project) used for job submission.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// List available backends.
    ///
    /// Entries that cannot be parsed are skipped with a warning rather than
    /// failing the whole listing.
    pub async fn list_backends(&self) -> IbmResult<Vec<BackendInfo>> {
        let url = format!("{}/v1/backends", self.endpoint);
        let response = check(self.client.get(&url).send().await?, None).await?;

        let listing: BackendsResponse = response.json().await?;
        let mut backends = Vec::with_capacity(listing.backends.len());
        for entry in listing.backends {
            match serde_json::from_value::<BackendInfo>(entry) {
                Ok(info) => backends.push(info),
                Err(e) => tracing::warn!("skipping malformed backend entry: {e}"),
            }
        }
        Ok(backends)
    }

    /// Get details for a specific backend.
    pub async fn get_backend(&self, name: &str) -> IbmResult<BackendInfo> {
        let url = format!("{}/v1/backends/{}", self.endpoint, name);
        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(IbmError::BackendUnavailable(name.to_string()));
        }
        Ok(check(response, None).await?.json().await?)
    }

    /// Submit one OpenQASM 3 circuit to the Sampler primitive.
    pub async fn submit_sampler_job(
        &self,
        backend: &str,
        circuit: String,
        shots: u32,
        optimization_level: u8,
    ) -> IbmResult<SubmitResponse> {
        let url = format!("{}/v1/jobs", self.endpoint);
        let request = SamplerJobRequest {
            program_id: "sampler",
            backend,
            hub: self.instance.as_deref(),
            params: SamplerParams {
                circuits: vec![circuit],
                shots,
                optimization_level,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;
        Ok(check(response, None).await?.json().await?)
    }

    /// Get job status.
    pub async fn get_job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/v1/jobs/{}", self.endpoint, job_id);
        let response = self.client.get(&url).send().await?;
        Ok(check(response, Some(job_id)).await?.json().await?)
    }

    /// Get job results.
    pub async fn get_job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/v1/jobs/{}/results", self.endpoint, job_id);
        let response = self.client.get(&url).send().await?;
        Ok(check(response, Some(job_id)).await?.json().await?)
    }
}

/// Turn a non-success response into an [`IbmError`].
///
/// A 404 on a job URL becomes [`IbmError::JobNotFound`].
async fn check(response: Response, job_id: Option<&str>) -> IbmResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (reqwest::StatusCode::NOT_FOUND, Some(id)) = (status, job_id) {
        return Err(IbmError::JobNotFound(id.to_string()));
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "no body".to_string());
    let error = serde_json::from_str::<ApiErrorResponse>(&body).unwrap_or(ApiErrorResponse {
        code: None,
        message: body,
    });
    Err(IbmError::ApiError {
        code: error.code.or_else(|| Some(status.as_u16().to_string())),
        message: error.message,
    })
}

// ============================================================================
// Request types
// ============================================================================

/// Sampler job request.
#[derive(Debug, Serialize)]
struct SamplerJobRequest<'a> {
    /// Runtime program.
    program_id: &'a str,
    /// Backend name.
    backend: &'a str,
    /// Instance (hub/group/project).
    #[serde(skip_serializing_if = "Option::is_none")]
    hub: Option<&'a str>,
    /// Sampler parameters.
    params: SamplerParams,
}

/// Sampler primitive parameters.
#[derive(Debug, Serialize)]
struct SamplerParams {
    /// OpenQASM 3.0 circuits.
    circuits: Vec<String>,
    /// Number of shots.
    shots: u32,
    /// Server-side transpiler optimization level.
    optimization_level: u8,
}

// ============================================================================
// Response types
// ============================================================================

/// API error response.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    /// Error code.
    #[serde(default)]
    code: Option<String>,
    /// Error message.
    #[serde(default)]
    message: String,
}

/// Backends list response (`{"backends": [...]}`).
#[derive(Debug, Deserialize)]
struct BackendsResponse {
    backends: Vec<serde_json::Value>,
}

/// Backend information.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendInfo {
    /// Backend name.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: usize,
    /// Backend status.
    #[serde(default)]
    pub status: BackendStatus,
    /// Whether this is a simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Maximum number of shots.
    #[serde(default)]
    pub max_shots: Option<u32>,
}

/// Backend status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendStatus {
    /// Whether the backend is operational.
    #[serde(default)]
    pub operational: bool,
    /// Status message.
    #[serde(default)]
    pub status_msg: Option<String>,
    /// Number of pending jobs.
    #[serde(default)]
    pub pending_jobs: Option<u32>,
}

impl BackendStatus {
    /// Short status label for listings.
    pub fn label(&self) -> String {
        match (&self.status_msg, self.operational) {
            (Some(msg), _) => msg.clone(),
            (None, true) => "active".to_string(),
            (None, false) => "offline".to_string(),
        }
    }
}

/// Job submission response.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Job ID.
    pub id: String,
    /// Job status.
    #[serde(default)]
    pub status: String,
}

/// Job status response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: String,
    /// Job status, case varies by API version.
    pub status: String,
    /// Backend name.
    #[serde(default)]
    pub backend: Option<String>,
    /// Error information if failed.
    #[serde(default)]
    pub error: Option<JobError>,
    /// State object with reason.
    #[serde(default)]
    pub state: Option<JobState>,
}

/// Job error information.
#[derive(Debug, Clone, Deserialize)]
pub struct JobError {
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Error message.
    pub message: String,
}

/// Job state with reason.
#[derive(Debug, Clone, Deserialize)]
pub struct JobState {
    /// Status string.
    #[serde(default)]
    pub status: String,
    /// Reason for failure.
    #[serde(default)]
    pub reason: Option<String>,
}

impl JobStatusResponse {
    fn normalized_status(&self) -> String {
        self.status.to_uppercase()
    }

    /// Check if job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.normalized_status().as_str(),
            "COMPLETED" | "FAILED" | "CANCELLED" | "ERROR"
        )
    }

    /// Check if job completed successfully.
    pub fn is_completed(&self) -> bool {
        self.normalized_status() == "COMPLETED"
    }

    /// Check if job failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.normalized_status().as_str(), "FAILED" | "ERROR")
    }

    /// Check if job was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.normalized_status() == "CANCELLED"
    }

    /// Get the error/failure reason message.
    pub fn error_message(&self) -> Option<String> {
        self.state
            .as_ref()
            .and_then(|s| s.reason.clone())
            .or_else(|| self.error.as_ref().map(|e| e.message.clone()))
    }
}

/// Job result response.
#[derive(Debug, Deserialize)]
pub struct JobResultResponse {
    /// Job ID.
    #[serde(default)]
    pub id: Option<String>,
    /// One entry per submitted circuit.
    pub results: Vec<SamplerResult>,
}

/// Sampler result for one circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResult {
    /// Per-register raw samples (hex string per shot).
    #[serde(default)]
    pub data: Option<HashMap<String, ClassicalRegisterData>>,
    /// Aggregated counts keyed by hex outcome.
    #[serde(default)]
    pub counts: Option<HashMap<String, u64>>,
    /// Quasi-probability distributions keyed by hex outcome.
    #[serde(default)]
    pub quasi_dists: Option<Vec<HashMap<String, f64>>>,
    /// Metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Classical register data.
#[derive(Debug, Deserialize)]
pub struct ClassicalRegisterData {
    /// Raw measurement samples as hex strings (e.g. `["0x0", "0x3"]`).
    pub samples: Vec<String>,
}
