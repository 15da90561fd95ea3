//! Density-matrix construction.

use ndarray::Array2;
use num_complex::Complex64;

use crate::statevector::Statevector;

/// Full density matrix ρ = |ψ⟩⟨ψ| of a pure state.
///
/// Built once and never mutated. Memory grows as 4^n, so callers gate
/// construction behind [`SimulatorConfig::max_density_qubits`](crate::SimulatorConfig).
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    matrix: Array2<Complex64>,
    num_qubits: usize,
}

impl DensityMatrix {
    /// Outer product of the state with its conjugate: ρ[i][j] = ψ[i]·conj(ψ[j]).
    pub fn from_statevector(sv: &Statevector) -> Self {
        let amps = sv.amplitudes();
        let dim = amps.len();
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| amps[i] * amps[j].conj());
        Self {
            matrix,
            num_qubits: sv.num_qubits(),
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Side length (2^n).
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Entry (i, j).
    pub fn get(&self, i: usize, j: usize) -> Complex64 {
        self.matrix[[i, j]]
    }

    /// The underlying matrix.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Trace; 1 for a normalized state.
    pub fn trace(&self) -> Complex64 {
        self.matrix.diag().sum()
    }

    /// Largest |ρ[i][j] − conj(ρ[j][i])| over all entries.
    pub fn hermiticity_error(&self) -> f64 {
        let dim = self.dim();
        let mut worst = 0.0_f64;
        for i in 0..dim {
            for j in i..dim {
                let d = (self.matrix[[i, j]] - self.matrix[[j, i]].conj()).norm();
                worst = worst.max(d);
            }
        }
        worst
    }

    /// Whether ρ equals its conjugate transpose within `tolerance`.
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        self.hermiticity_error() <= tolerance
    }

    /// tr(ρ²), equal to 1 exactly when ρ is rank one.
    pub fn purity(&self) -> f64 {
        // For Hermitian ρ, tr(ρ²) = Σ |ρ_ij|².
        self.matrix.iter().map(|c| c.norm_sqr()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_ir::Circuit;

    #[test]
    fn test_bell_density_matrix() {
        let sv = Statevector::evolve(&Circuit::bell().unwrap());
        let rho = DensityMatrix::from_statevector(&sv);

        assert_eq!(rho.dim(), 4);
        for (i, j) in [(0, 0), (0, 3), (3, 0), (3, 3)] {
            assert!((rho.get(i, j).re - 0.5).abs() < 1e-12);
        }
        assert!(rho.get(1, 1).norm() < 1e-12);
        assert!((rho.trace().re - 1.0).abs() < 1e-12);
        assert!(rho.is_hermitian(1e-12));
        assert!((rho.purity() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_complex_phases_are_conjugated() {
        use qsim_ir::QubitId;

        let mut circuit = Circuit::with_size(1).unwrap();
        circuit.h(QubitId(0)).unwrap().s(QubitId(0)).unwrap();
        let rho = DensityMatrix::from_statevector(&Statevector::evolve(&circuit));

        // (|0⟩ + i|1⟩)/√2: ρ01 = -i/2, ρ10 = i/2.
        assert!((rho.get(0, 1) - Complex64::new(0.0, -0.5)).norm() < 1e-12);
        assert!((rho.get(1, 0) - Complex64::new(0.0, 0.5)).norm() < 1e-12);
    }
}
