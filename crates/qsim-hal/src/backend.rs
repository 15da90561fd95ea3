//! Backend descriptions returned by [`HardwareProvider::list_backends`](crate::HardwareProvider::list_backends).

use serde::{Deserialize, Serialize};

/// Whether a backend is real hardware or a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Classical simulator.
    Simulator,
    /// Physical quantum device.
    Quantum,
}

/// Description of a single backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name, as accepted by `submit`.
    pub name: String,
    /// Simulator or hardware.
    #[serde(rename = "type")]
    pub kind: BackendKind,
    /// Human-readable description.
    pub description: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Provider-reported status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl BackendInfo {
    /// Describe a simulator backend.
    pub fn simulator(
        name: impl Into<String>,
        description: impl Into<String>,
        num_qubits: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: BackendKind::Simulator,
            description: description.into(),
            num_qubits,
            status: None,
        }
    }

    /// Describe a hardware backend.
    pub fn quantum(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            kind: BackendKind::Quantum,
            description: String::new(),
            num_qubits,
            status: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status message.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Whether this backend is a simulator.
    pub fn is_simulator(&self) -> bool {
        self.kind == BackendKind::Simulator
    }
}
