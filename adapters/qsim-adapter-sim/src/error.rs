//! Error types for the simulation engine.

use qsim_ir::IrError;
use thiserror::Error;

/// Errors produced by the simulation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit failed validation.
    #[error(transparent)]
    Validation(#[from] IrError),

    /// The qubit count exceeds a configured allocation ceiling.
    #[error("{num_qubits} qubits exceeds the {what} limit of {limit}")]
    CapacityExceeded {
        /// Requested qubit count.
        num_qubits: usize,
        /// Configured ceiling.
        limit: usize,
        /// Which allocation would overflow.
        what: &'static str,
    },

    /// Shot count outside `1..=max`.
    #[error("shots must be between 1 and {max}, got {shots}")]
    InvalidShots {
        /// Requested shots.
        shots: u64,
        /// Configured maximum.
        max: u64,
    },

    /// A gate was applied with operands that don't fit the state.
    #[error("gate '{gate}' cannot act on qubits {qubits:?} of a {num_qubits}-qubit state")]
    InvalidOperands {
        /// Gate name.
        gate: &'static str,
        /// Offending operands.
        qubits: Vec<u32>,
        /// Size of the state.
        num_qubits: usize,
    },

    /// Partial trace target outside the matrix's qubits.
    #[error("cannot reduce to qubit {qubit}: density matrix has {num_qubits} qubits")]
    TargetOutOfRange {
        /// Requested qubit.
        qubit: usize,
        /// Qubits in the density matrix.
        num_qubits: usize,
    },

    /// The outcome distribution has no usable weight.
    #[error("cannot sample from statevector: {0}")]
    Distribution(String),
}

impl SimError {
    /// Whether the error was caused by the caller's input rather than the engine.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SimError::Distribution(_))
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
