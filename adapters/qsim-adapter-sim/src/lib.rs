//! qsim Numerical Engine
//!
//! Exact simulation of small circuits built from the `qsim-ir` gate set:
//! statevector evolution, shot sampling, the full density matrix, one reduced
//! density matrix per qubit and the von Neumann entropy of each.
//!
//! The engine is synchronous and pure. It never performs I/O and never sees
//! hardware-provider credentials.
//!
//! # Resource use
//!
//! | Qubits | Statevector | Density matrix |
//! |--------|-------------|----------------|
//! | 4 | 256 B | 4 KB |
//! | 8 | 4 KB | 1 MB |
//! | 12 | 64 KB | 256 MB |
//! | 20 | 16 MB | not built |
//! | 24 | 256 MB | not built |
//!
//! [`SimulatorConfig`] sets the ceilings; circuits above them are rejected
//! with [`SimError::CapacityExceeded`] before anything is allocated.
//!
//! # Example
//!
//! ```
//! use qsim_adapter_sim::{SimulationPipeline, SimulatorConfig};
//! use qsim_ir::Circuit;
//!
//! let pipeline = SimulationPipeline::new(SimulatorConfig::default().with_seed(7));
//! let report = pipeline.run(&Circuit::bell().unwrap(), 1024).unwrap();
//!
//! assert_eq!(report.counts.total(), 1024);
//! assert!((report.entanglement_entropies[0] - 1.0).abs() < 1e-9);
//! ```

mod config;
mod density;
mod entropy;
mod error;
pub mod gates;
mod partial_trace;
mod pipeline;
mod sampler;
mod statevector;

pub use config::SimulatorConfig;
pub use density::DensityMatrix;
pub use entropy::{eigenvalues, entropy_of_spectrum, von_neumann_entropy};
pub use error::{SimError, SimResult};
pub use partial_trace::{ReducedDensityMatrix, reduce, reduce_all};
pub use pipeline::{NumericAnomaly, SimulationPipeline, SimulationReport};
pub use sampler::{MeasurementOutcome, MeasurementSampler};
pub use statevector::Statevector;

/// Names of the backends served by this engine.
pub const LOCAL_BACKENDS: [(&str, &str); 3] = [
    ("simulator", "Local statevector and QASM simulator"),
    ("statevector_simulator", "Local statevector simulator"),
    ("qasm_simulator", "Local QASM simulator"),
];

/// Whether `backend` names one of the [`LOCAL_BACKENDS`].
pub fn is_local_backend(backend: &str) -> bool {
    LOCAL_BACKENDS.iter().any(|(name, _)| *name == backend)
}
