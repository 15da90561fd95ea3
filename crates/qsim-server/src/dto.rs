//! Data Transfer Objects for API requests and responses.

use std::collections::BTreeMap;

use num_complex::Complex64;
use qsim_adapter_sim::{
    DensityMatrix, MeasurementOutcome, NumericAnomaly, ReducedDensityMatrix, SimulationReport,
};
use qsim_hal::{Counts, JobId, JobStatus};
use qsim_ir::CircuitInput;
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /api/circuits/run`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunRequest {
    /// Circuit to run.
    pub circuit: CircuitInput,
    /// Execution options.
    #[serde(default)]
    pub options: RunOptions,
}

/// Execution options. Numeric fields stay signed so range errors are reported
/// by validation rather than by the decoder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunOptions {
    /// Backend name.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Shot count; the server default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<i64>,
    /// Transpiler optimization level, forwarded to hardware only.
    #[serde(default = "default_optimization_level")]
    pub optimization_level: i64,
}

fn default_backend() -> String {
    "simulator".into()
}

fn default_optimization_level() -> i64 {
    1
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            shots: None,
            optimization_level: default_optimization_level(),
        }
    }
}

/// Body of `POST /api/circuits/code`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeRequest {
    pub circuit: CircuitInput,
}

// ============================================================================
// Responses
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A complex number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexValue {
    pub re: f64,
    pub im: f64,
}

impl From<Complex64> for ComplexValue {
    fn from(c: Complex64) -> Self {
        Self { re: c.re, im: c.im }
    }
}

/// Circuit summary echoed back with the results.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitSummary {
    pub num_qubits: usize,
    /// Gate count, measures included.
    pub depth: usize,
}

/// Local simulation result.
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub circuit: CircuitSummary,
    pub statevector: Vec<ComplexValue>,
    pub counts: MeasurementOutcome,
    pub density_matrix: Vec<Vec<ComplexValue>>,
    pub reduced_density_matrices: Vec<Vec<Vec<ComplexValue>>>,
    pub entanglement_entropies: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<NumericAnomaly>,
}

impl From<SimulationReport> for SimulationResponse {
    fn from(report: SimulationReport) -> Self {
        Self {
            circuit: CircuitSummary {
                num_qubits: report.num_qubits,
                depth: report.depth,
            },
            statevector: report
                .statevector
                .amplitudes()
                .iter()
                .map(|&a| a.into())
                .collect(),
            counts: report.counts,
            density_matrix: density_rows(&report.density_matrix),
            reduced_density_matrices: report
                .reduced_density_matrices
                .iter()
                .map(reduced_rows)
                .collect(),
            entanglement_entropies: report.entanglement_entropies,
            warnings: report.warnings,
        }
    }
}

fn density_rows(rho: &DensityMatrix) -> Vec<Vec<ComplexValue>> {
    rho.as_array()
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|&c| c.into()).collect())
        .collect()
}

fn reduced_rows(reduced: &ReducedDensityMatrix) -> Vec<Vec<ComplexValue>> {
    reduced
        .entries()
        .iter()
        .map(|row| row.iter().map(|&c| c.into()).collect())
        .collect()
}

/// Acknowledgement of a hardware submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmittedResponse {
    pub job_id: String,
    pub status: String,
    pub backend: String,
}

impl SubmittedResponse {
    pub fn new(job_id: JobId, backend: impl Into<String>) -> Self {
        Self {
            job_id: job_id.0,
            status: "submitted".into(),
            backend: backend.into(),
        }
    }
}

/// Job poll result.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobResponse {
    pub job_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<BTreeMap<String, u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobResponse {
    /// A finished job with its histogram.
    pub fn completed(job_id: &JobId, counts: Counts) -> Self {
        Self {
            job_id: job_id.0.clone(),
            status: JobStatus::Completed.name().to_string(),
            counts: Some(counts.iter().map(|(k, v)| (k.clone(), *v)).collect()),
            message: None,
        }
    }

    /// A job that has not produced counts.
    pub fn pending(job_id: &JobId, status: &JobStatus) -> Self {
        Self {
            job_id: job_id.0.clone(),
            status: status.name().to_string(),
            counts: None,
            message: Some(status.message()),
        }
    }
}

/// Generated client script.
#[derive(Debug, Serialize, Deserialize)]
pub struct CodeResponse {
    pub code: String,
}
