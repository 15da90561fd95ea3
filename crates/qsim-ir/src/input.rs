//! Wire-format circuit description, before validation.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;

/// Circuit as submitted by a client.
///
/// Fields are deliberately loose (signed integers, free-form names) so that
/// every malformed request reaches [`Circuit::from_input`] and fails with a
/// precise [`IrError`](crate::IrError) instead of a generic decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInput {
    /// Number of qubits.
    pub num_qubits: i64,
    /// Initial basis state per qubit (`"0"` or `"1"`); all `"0"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_states: Option<Vec<String>>,
    /// Gates in arbitrary order.
    #[serde(default)]
    pub gates: Vec<GateInput>,
}

/// A single gate as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateInput {
    /// Gate name (e.g. `"h"`, `"cx"`).
    pub name: String,
    /// Qubit indices.
    #[serde(default)]
    pub qubits: Vec<i64>,
    /// Execution order key.
    #[serde(default)]
    pub position: i64,
}

impl GateInput {
    /// Create a gate entry.
    pub fn new(name: impl Into<String>, qubits: impl Into<Vec<i64>>, position: i64) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into(),
            position,
        }
    }
}

impl From<&Circuit> for CircuitInput {
    fn from(circuit: &Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits() as i64,
            initial_states: Some(
                circuit
                    .initial_states()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
            gates: circuit
                .gates()
                .iter()
                .map(|g| GateInput {
                    name: g.name().to_string(),
                    qubits: g.qubits.iter().map(|q| i64::from(q.0)).collect(),
                    position: g.position,
                })
                .collect(),
        }
    }
}
