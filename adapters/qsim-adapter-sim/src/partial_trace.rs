//! Single-qubit partial trace.

use num_complex::Complex64;

use crate::density::DensityMatrix;
use crate::error::{SimError, SimResult};

/// 2×2 density matrix of one qubit after tracing out the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedDensityMatrix {
    qubit: usize,
    entries: [[Complex64; 2]; 2],
}

impl ReducedDensityMatrix {
    /// Build from explicit entries.
    pub fn new(qubit: usize, entries: [[Complex64; 2]; 2]) -> Self {
        Self { qubit, entries }
    }

    /// The qubit this matrix describes.
    pub fn qubit(&self) -> usize {
        self.qubit
    }

    /// Entry (a, b).
    pub fn get(&self, a: usize, b: usize) -> Complex64 {
        self.entries[a][b]
    }

    /// Row-major entries.
    pub fn entries(&self) -> &[[Complex64; 2]; 2] {
        &self.entries
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.entries[0][0] + self.entries[1][1]
    }
}

/// Reduce `rho` to qubit `target`.
///
/// `reduced[a][b] = Σ_k ρ[k | a·2^t][k | b·2^t]` where `k` runs over basis
/// indices with bit `t` clear.
pub fn reduce(rho: &DensityMatrix, target: usize) -> SimResult<ReducedDensityMatrix> {
    let num_qubits = rho.num_qubits();
    if target >= num_qubits {
        return Err(SimError::TargetOutOfRange {
            qubit: target,
            num_qubits,
        });
    }

    Ok(trace_out(rho, target))
}

/// Reduce to every qubit in index order.
pub fn reduce_all(rho: &DensityMatrix) -> Vec<ReducedDensityMatrix> {
    (0..rho.num_qubits()).map(|q| trace_out(rho, q)).collect()
}

fn trace_out(rho: &DensityMatrix, target: usize) -> ReducedDensityMatrix {
    let mask = 1 << target;
    let mut entries = [[Complex64::new(0.0, 0.0); 2]; 2];
    for k in (0..rho.dim()).filter(|k| k & mask == 0) {
        let idx = [k, k | mask];
        for a in 0..2 {
            for b in 0..2 {
                entries[a][b] += rho.get(idx[a], idx[b]);
            }
        }
    }
    ReducedDensityMatrix::new(target, entries)
}
