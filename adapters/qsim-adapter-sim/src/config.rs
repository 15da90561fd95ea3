//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Capacity ceilings and numeric settings for [`SimulationPipeline`](crate::SimulationPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest circuit the statevector engine accepts (2^n amplitudes).
    pub max_statevector_qubits: usize,
    /// Largest circuit for which the 2^n × 2^n density matrix is built.
    pub max_density_qubits: usize,
    /// Upper bound on shots per run.
    pub max_shots: u64,
    /// Tolerance used when checking numeric invariants.
    pub tolerance: f64,
    /// Fixed RNG seed for reproducible sampling.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_statevector_qubits: 24,
            max_density_qubits: 12,
            max_shots: 1_000_000,
            tolerance: 1e-6,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Widest circuit a full run accepts.
    ///
    /// Every run builds the density matrix, so this is the smaller of the two
    /// ceilings.
    pub fn max_qubits(&self) -> usize {
        self.max_statevector_qubits.min(self.max_density_qubits)
    }

    /// Use a fixed sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the density-matrix ceiling.
    pub fn with_max_density_qubits(mut self, limit: usize) -> Self {
        self.max_density_qubits = limit;
        self
    }

    /// Override the statevector ceiling.
    pub fn with_max_statevector_qubits(mut self, limit: usize) -> Self {
        self.max_statevector_qubits = limit;
        self
    }

    /// Override the shot ceiling.
    pub fn with_max_shots(mut self, max_shots: u64) -> Self {
        self.max_shots = max_shots;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_qubits_is_tighter_ceiling() {
        assert_eq!(SimulatorConfig::default().max_qubits(), 12);
        let config = SimulatorConfig::default()
            .with_max_density_qubits(20)
            .with_max_statevector_qubits(16);
        assert_eq!(config.max_qubits(), 16);
    }
}
