//! Gate catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::qubit::QubitId;

/// The closed set of gates a circuit may contain.
///
/// Each variant has a fixed arity; the unitary action lives in the simulator,
/// which matches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Controlled-X (CNOT) gate. Qubits are `[control, target]`.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Computational-basis measurement.
    Measure,
}

impl GateKind {
    /// Every gate in the catalog.
    pub const ALL: [GateKind; 10] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::CX,
        GateKind::CZ,
        GateKind::Swap,
        GateKind::Measure,
    ];

    /// Get the wire name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::CX => "cx",
            GateKind::CZ => "cz",
            GateKind::Swap => "swap",
            GateKind::Measure => "measure",
        }
    }

    /// Look a gate up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        GateKind::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateKind::H
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::S
            | GateKind::T
            | GateKind::Measure => 1,

            GateKind::CX | GateKind::CZ | GateKind::Swap => 2,
        }
    }

    /// Whether this gate acts unitarily on the statevector.
    #[inline]
    pub fn is_unitary(self) -> bool {
        !matches!(self, GateKind::Measure)
    }

    /// Human-readable label.
    pub fn description(self) -> &'static str {
        match self {
            GateKind::H => "Hadamard gate",
            GateKind::X => "X gate",
            GateKind::Y => "Y gate",
            GateKind::Z => "Z gate",
            GateKind::S => "S gate",
            GateKind::T => "T gate",
            GateKind::CX => "CNOT gate",
            GateKind::CZ => "CZ gate",
            GateKind::Swap => "SWAP gate",
            GateKind::Measure => "Measure qubit",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gate applied to concrete qubits at a given position.
///
/// Only [`Circuit`](crate::Circuit) constructs these, so the arity and
/// qubit range are always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gate {
    /// Which gate.
    pub kind: GateKind,
    /// Operand qubits, in gate order (e.g. control first for `cx`).
    pub qubits: Vec<QubitId>,
    /// Execution order key.
    pub position: i64,
}

impl Gate {
    /// Get the wire name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether this gate touches more than one qubit.
    #[inline]
    pub fn is_multi_qubit(&self) -> bool {
        self.qubits.len() > 1
    }

    /// Whether this gate touches the given qubit.
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}
