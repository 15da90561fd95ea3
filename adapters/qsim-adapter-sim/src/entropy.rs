//! Von Neumann entropy of single-qubit states.

use crate::partial_trace::ReducedDensityMatrix;

/// Eigenvalues of a 2×2 Hermitian matrix, largest first, without clamping.
///
/// For [[a, b], [b*, d]] they are `(a + d ± √((a − d)² + 4|b|²)) / 2`.
pub fn eigenvalues(rho: &ReducedDensityMatrix) -> [f64; 2] {
    let a = rho.get(0, 0).re;
    let d = rho.get(1, 1).re;
    let b = rho.get(0, 1);
    let half_trace = (a + d) / 2.0;
    let gap = ((a - d).powi(2) + 4.0 * b.norm_sqr()).sqrt() / 2.0;
    [half_trace + gap, half_trace - gap]
}

/// `-Σ λ log2 λ` over the given spectrum.
///
/// Negative rounding artifacts are clamped to 0 and `0·log2(0)` is taken as 0.
pub fn entropy_of_spectrum(spectrum: &[f64]) -> f64 {
    let s: f64 = spectrum
        .iter()
        .map(|&lambda| lambda.max(0.0))
        .filter(|&lambda| lambda > 0.0)
        .map(|lambda| -lambda * lambda.log2())
        .sum();
    // -0.0 for pure states
    s.max(0.0)
}

/// Entropy in bits; 0 for a pure qubit, 1 for a maximally mixed one.
pub fn von_neumann_entropy(rho: &ReducedDensityMatrix) -> f64 {
    entropy_of_spectrum(&eigenvalues(rho)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn reduced(a: f64, b: Complex64, d: f64) -> ReducedDensityMatrix {
        ReducedDensityMatrix::new(0, [[Complex64::new(a, 0.0), b], [b.conj(), Complex64::new(d, 0.0)]])
    }

    #[test]
    fn test_pure_states_have_zero_entropy() {
        let zero = reduced(1.0, Complex64::new(0.0, 0.0), 0.0);
        assert_eq!(von_neumann_entropy(&zero), 0.0);

        let plus = reduced(0.5, Complex64::new(0.5, 0.0), 0.5);
        assert!(von_neumann_entropy(&plus).abs() < 1e-10);

        let plus_i = reduced(0.5, Complex64::new(0.0, -0.5), 0.5);
        assert!(von_neumann_entropy(&plus_i).abs() < 1e-10);
    }

    #[test]
    fn test_maximally_mixed_has_one_bit() {
        let mixed = reduced(0.5, Complex64::new(0.0, 0.0), 0.5);
        assert!((von_neumann_entropy(&mixed) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_mixing() {
        let rho = reduced(0.75, Complex64::new(0.0, 0.0), 0.25);
        let expected = -(0.75_f64 * 0.75_f64.log2() + 0.25 * 0.25_f64.log2());
        assert!((von_neumann_entropy(&rho) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_negative_eigenvalue_is_clamped() {
        assert_eq!(entropy_of_spectrum(&[1.0 + 1e-15, -1e-15]), 0.0);
    }

    #[test]
    fn test_eigenvalues_sum_to_trace() {
        let rho = reduced(0.3, Complex64::new(0.1, 0.2), 0.7);
        let [l1, l2] = eigenvalues(&rho);
        assert!((l1 + l2 - 1.0).abs() < 1e-12);
        assert!(l1 >= l2);
    }
}
