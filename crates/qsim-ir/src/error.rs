//! Error types for the IR crate.

use thiserror::Error;

/// Validation failures raised while building a [`Circuit`](crate::Circuit).
///
/// Gate-related variants carry the gate name and its index in the input list
/// so the caller can point at the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit count is zero or negative.
    #[error("Circuit must have at least one qubit, got {0}")]
    NoQubits(i64),

    /// Qubit count cannot be addressed by a basis-state index.
    #[error("Circuit has {num_qubits} qubits, more than the addressable maximum of {limit}")]
    TooManyQubits {
        /// Requested qubit count.
        num_qubits: i64,
        /// Largest addressable qubit count.
        limit: u32,
    },

    /// Gate name is not in the catalog.
    #[error("Unsupported gate '{name}' (gate #{index})")]
    UnknownGate {
        /// The unrecognized name.
        name: String,
        /// Index of the gate in the input list.
        index: usize,
    },

    /// Gate was given the wrong number of qubits.
    #[error("Gate '{gate_name}' (gate #{index}) requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Index of the gate in the input list.
        index: usize,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Gate references a qubit outside `[0, num_qubits)`.
    #[error(
        "Gate '{gate_name}' (gate #{index}) references qubit {qubit} but circuit only has {num_qubits} qubits"
    )]
    QubitOutOfRange {
        /// Name of the gate.
        gate_name: String,
        /// Index of the gate in the input list.
        index: usize,
        /// The offending qubit index.
        qubit: i64,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// Multi-qubit gate names the same qubit twice.
    #[error("Gate '{gate_name}' (gate #{index}) uses qubit {qubit} more than once")]
    DuplicateQubit {
        /// Name of the gate.
        gate_name: String,
        /// Index of the gate in the input list.
        index: usize,
        /// The repeated qubit.
        qubit: u32,
    },

    /// Initial state entry is not `"0"` or `"1"`.
    #[error("Initial state of qubit {qubit} must be \"0\" or \"1\", got {value:?}")]
    InvalidInitialState {
        /// Qubit the entry belongs to.
        qubit: usize,
        /// The rejected value.
        value: String,
    },

    /// Initial state list length differs from the qubit count.
    #[error("Expected {expected} initial states, got {got}")]
    InitialStateLength {
        /// Number of qubits.
        expected: usize,
        /// Number of entries provided.
        got: usize,
    },
}

impl IrError {
    /// Name of the offending gate, if this error concerns a gate.
    pub fn gate_name(&self) -> Option<&str> {
        match self {
            IrError::UnknownGate { name, .. } => Some(name),
            IrError::QubitCountMismatch { gate_name, .. }
            | IrError::QubitOutOfRange { gate_name, .. }
            | IrError::DuplicateQubit { gate_name, .. } => Some(gate_name),
            _ => None,
        }
    }

    /// Input index of the offending gate, if this error concerns a gate.
    pub fn gate_index(&self) -> Option<usize> {
        match self {
            IrError::UnknownGate { index, .. }
            | IrError::QubitCountMismatch { index, .. }
            | IrError::QubitOutOfRange { index, .. }
            | IrError::DuplicateQubit { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
