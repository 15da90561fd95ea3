//! End-to-end simulation of a validated circuit.
//!
//! ```text
//!   Circuit ──→ Statevector ──┬──→ MeasurementSampler ──→ counts
//!                             └──→ DensityMatrix ──→ reduce_all ──→ entropies
//! ```
//!
//! A single evolution feeds both branches, so sampled counts and the
//! returned amplitudes always describe the same state. Capacity and shot
//! checks run before any amplitude is allocated.

use std::fmt;
use std::time::{Duration, Instant};

use qsim_ir::Circuit;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::SimulatorConfig;
use crate::density::DensityMatrix;
use crate::entropy::{eigenvalues, von_neumann_entropy};
use crate::error::{SimError, SimResult};
use crate::partial_trace::{ReducedDensityMatrix, reduce_all};
use crate::sampler::{MeasurementOutcome, MeasurementSampler};
use crate::statevector::Statevector;

/// An invariant that drifted past tolerance. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumericAnomaly {
    /// Σ|ψᵢ|² is not 1.
    Normalization {
        /// Observed sum.
        sum: f64,
    },
    /// tr(ρ) is not 1.
    DensityTrace {
        /// Observed trace (real part).
        trace: f64,
    },
    /// ρ differs from its conjugate transpose.
    NotHermitian {
        /// Largest entry-wise deviation.
        max_deviation: f64,
    },
    /// A reduced matrix has trace other than 1.
    ReducedTrace {
        /// Qubit index.
        qubit: usize,
        /// Observed trace (real part).
        trace: f64,
    },
    /// A reduced eigenvalue fell outside [0, 1] and was clamped.
    EigenvalueOutOfRange {
        /// Qubit index.
        qubit: usize,
        /// Raw eigenvalue.
        value: f64,
    },
}

impl fmt::Display for NumericAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericAnomaly::Normalization { sum } => {
                write!(f, "statevector norm² is {sum}, expected 1")
            }
            NumericAnomaly::DensityTrace { trace } => {
                write!(f, "density matrix trace is {trace}, expected 1")
            }
            NumericAnomaly::NotHermitian { max_deviation } => {
                write!(f, "density matrix deviates from Hermitian by {max_deviation}")
            }
            NumericAnomaly::ReducedTrace { qubit, trace } => {
                write!(f, "reduced density matrix of qubit {qubit} has trace {trace}")
            }
            NumericAnomaly::EigenvalueOutOfRange { qubit, value } => {
                write!(f, "qubit {qubit} eigenvalue {value} clamped to [0, 1]")
            }
        }
    }
}

/// Everything computed for one circuit.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Qubit count.
    pub num_qubits: usize,
    /// Number of gates, measures included.
    pub depth: usize,
    /// Final state.
    pub statevector: Statevector,
    /// Sampled histogram.
    pub counts: MeasurementOutcome,
    /// ρ = |ψ⟩⟨ψ|.
    pub density_matrix: DensityMatrix,
    /// One 2×2 matrix per qubit, in qubit order.
    pub reduced_density_matrices: Vec<ReducedDensityMatrix>,
    /// Entropy of each reduced matrix, in bits.
    pub entanglement_entropies: Vec<f64>,
    /// Invariants that drifted past tolerance.
    pub warnings: Vec<NumericAnomaly>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Runs circuits through the numerical engine under a fixed configuration.
///
/// Holds no per-request state; one pipeline may serve any number of runs.
#[derive(Debug, Clone, Default)]
pub struct SimulationPipeline {
    config: SimulatorConfig,
}

impl SimulationPipeline {
    /// Create a pipeline.
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Reject circuits or shot counts the configuration does not allow.
    pub fn check_limits(&self, circuit: &Circuit, shots: u64) -> SimResult<()> {
        let n = circuit.num_qubits();
        if n > self.config.max_statevector_qubits {
            return Err(SimError::CapacityExceeded {
                num_qubits: n,
                limit: self.config.max_statevector_qubits,
                what: "statevector",
            });
        }
        if n > self.config.max_density_qubits {
            return Err(SimError::CapacityExceeded {
                num_qubits: n,
                limit: self.config.max_density_qubits,
                what: "density matrix",
            });
        }
        if shots == 0 || shots > self.config.max_shots {
            return Err(SimError::InvalidShots {
                shots,
                max: self.config.max_shots,
            });
        }
        Ok(())
    }

    /// Evolve, sample and analyse `circuit`.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit, shots: u64) -> SimResult<SimulationReport> {
        self.check_limits(circuit, shots)?;
        let start = Instant::now();
        let tol = self.config.tolerance;
        let mut warnings = Vec::new();

        let statevector = Statevector::evolve(circuit);
        let norm = statevector.norm_sqr_sum();
        if (norm - 1.0).abs() > tol {
            warnings.push(NumericAnomaly::Normalization { sum: norm });
        }

        let counts = MeasurementSampler::from_seed(self.config.seed).sample(&statevector, shots)?;

        let density_matrix = DensityMatrix::from_statevector(&statevector);
        let trace = density_matrix.trace().re;
        if (trace - 1.0).abs() > tol {
            warnings.push(NumericAnomaly::DensityTrace { trace });
        }
        let max_deviation = density_matrix.hermiticity_error();
        if max_deviation > tol {
            warnings.push(NumericAnomaly::NotHermitian { max_deviation });
        }
        debug!(dim = density_matrix.dim(), "density matrix built");

        let reduced_density_matrices = reduce_all(&density_matrix);
        let mut entanglement_entropies = Vec::with_capacity(reduced_density_matrices.len());
        for reduced in &reduced_density_matrices {
            let qubit = reduced.qubit();
            let trace = reduced.trace().re;
            if (trace - 1.0).abs() > tol {
                warnings.push(NumericAnomaly::ReducedTrace { qubit, trace });
            }
            for value in eigenvalues(reduced) {
                if value < -tol || value > 1.0 + tol {
                    warnings.push(NumericAnomaly::EigenvalueOutOfRange { qubit, value });
                }
            }
            entanglement_entropies.push(von_neumann_entropy(reduced));
        }

        for anomaly in &warnings {
            warn!(%anomaly, "numeric invariant drifted");
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, "simulation completed");

        Ok(SimulationReport {
            num_qubits: circuit.num_qubits(),
            depth: circuit.depth(),
            statevector,
            counts,
            density_matrix,
            reduced_density_matrices,
            entanglement_entropies,
            warnings,
            elapsed,
        })
    }
}
