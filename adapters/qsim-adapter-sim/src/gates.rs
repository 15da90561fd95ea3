//! Fixed unitaries for the supported gate set.
//!
//! The statevector engine applies these with specialised index loops rather
//! than matrix products; the matrices here are the reference those loops are
//! tested against.

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;
use qsim_ir::GateKind;

/// A 2×2 single-qubit operator, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// A 4×4 two-qubit operator, row-major over `|q1 q0⟩` where `q0` is the first operand.
pub type Matrix4 = [[Complex64; 4]; 4];

/// Unitary action of a gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unitary {
    /// Acts on one qubit.
    Single(Matrix2),
    /// Acts on an ordered pair of qubits.
    Two(Matrix4),
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Unitary matrix of `kind`, or `None` for non-unitary operations (`measure`).
pub fn unitary(kind: GateKind) -> Option<Unitary> {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    let m = match kind {
        GateKind::H => Unitary::Single([[h, h], [h, -h]]),
        GateKind::X => Unitary::Single([[ZERO, ONE], [ONE, ZERO]]),
        GateKind::Y => Unitary::Single([[ZERO, -I], [I, ZERO]]),
        GateKind::Z => Unitary::Single([[ONE, ZERO], [ZERO, -ONE]]),
        GateKind::S => Unitary::Single([[ONE, ZERO], [ZERO, I]]),
        GateKind::T => Unitary::Single([
            [ONE, ZERO],
            [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
        ]),
        // Basis order |t c⟩: index = c + 2t for (control, target).
        GateKind::CX => Unitary::Two([
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO],
        ]),
        GateKind::CZ => Unitary::Two([
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ZERO, ZERO, -ONE],
        ]),
        GateKind::Swap => Unitary::Two([
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
        ]),
        GateKind::Measure => return None,
    };
    Some(m)
}
